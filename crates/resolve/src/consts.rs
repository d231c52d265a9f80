use regex::Regex;
use std::sync::LazyLock;

/// Locates the identifier of a corpus file: a decade directory (`1890s/`)
/// followed by `name.ext`, which is captured.
pub const ID_PATTERN: &str = r"[0-9]+s/([^.]+\.[^.]+).*";

/// Years embedded in a filename after `name.ext.`: the year the text was
/// written, then optionally the year it was printed, e.g.
/// `vol1.txt.1887_1901-extra`.
pub const FALLBACK_YEAR_PATTERN: &str = r"[^.]+\.[^.]+\.([12][90][0-9][0-9])[._-]([12][90][0-9][0-9])?.*";

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

regex!(ID_REGEX, ID_PATTERN);
regex!(FALLBACK_YEAR_REGEX, FALLBACK_YEAR_PATTERN);
