//! CLI command for writing declarations

use std::path::Path;

use super::{load_config, open_converter};
use crate::emitter::InitKind;

pub fn execute(input: &Path, kind: InitKind, output: Option<&Path>, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let converter = open_converter(input, &config)?;

    match output {
        Some(path) => {
            converter.write_init_file(kind, path)?;
            println!("Wrote {} declarations to {}", kind, path.display());
        }
        None => print!("{}", converter.render_init(kind)),
    }
    Ok(())
}
