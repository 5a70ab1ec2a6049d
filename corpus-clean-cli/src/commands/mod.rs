//! CLI command implementations

use std::ffi::OsString;

pub mod clean;

pub use clean::CleanArgs;

/// Multi-letter single-dash flags accepted for compatibility with older
/// invocations, and the long flag each one stands for
const LEGACY_FLAGS: [(&str, &str); 4] = [
    ("-sl", "--sourcelang"),
    ("-tl", "--targetlang"),
    ("-val", "--valsize"),
    ("-test", "--testsize"),
];

/// Rewrite legacy flags (`-sl en`, `-val=0.01`) to their long form.
///
/// clap reads `-sl` as `-s l`, so this has to run before parsing.
/// Everything after a `--` terminator is left untouched.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut terminated = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg: OsString| {
            if terminated {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                terminated = true;
                return arg;
            }
            for (legacy, long) in LEGACY_FLAGS {
                if text == legacy {
                    return OsString::from(long);
                }
                if let Some(value) = text
                    .strip_prefix(legacy)
                    .and_then(|rest| rest.strip_prefix('='))
                {
                    return OsString::from(format!("{long}={value}"));
                }
            }
            arg
        })
        .collect()
}
