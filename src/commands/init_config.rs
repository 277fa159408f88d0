//! Init Config Command
//!
//! Writes a default evaluation config to disk.

use std::path::Path;

use crate::error::Result;
use crate::model::EvalConfig;

pub fn execute(output: &Path, output_dir: &str, batch_size: usize) -> Result<()> {
    let config = EvalConfig::new(output_dir.to_string()).with_eval_batch_size(batch_size);
    config.validate()?;
    config.save_to(output)?;

    println!("═══════════════════════════════════════════════════════════");
    println!("  Config written: {}", output.display());
    println!("  output_dir: {}", config.output_dir);
    println!("  eval_batch_size: {}", config.eval_batch_size);
    println!(
        "  generation: max_length={} num_beams={} no_repeat_ngram_size={}",
        config.generation.max_length,
        config.generation.num_beams,
        config.generation.no_repeat_ngram_size
    );
    println!("═══════════════════════════════════════════════════════════");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_written_config_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("eval.json");

        execute(&path, "runs/eval", 8).unwrap();

        let config = EvalConfig::from_file(&path).unwrap();
        assert_eq!(config.output_dir, "runs/eval");
        assert_eq!(config.eval_batch_size, 8);
    }
}
