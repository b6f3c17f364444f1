use std::io::{self, Write};
use std::process;

fn main() -> anyhow::Result<()> {
    let code = termcompat_cli::diagnostics::run()?;

    let _ = io::stderr().flush();
    let _ = io::stdout().flush();

    process::exit(code)
}
