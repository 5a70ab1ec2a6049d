use clap::Parser;
use corpus_clean_cli::{normalize_legacy_flags, CleanArgs};

fn main() -> anyhow::Result<()> {
    let args = CleanArgs::parse_from(normalize_legacy_flags(std::env::args_os()));
    args.execute()
}
