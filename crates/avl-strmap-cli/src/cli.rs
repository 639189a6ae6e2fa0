use std::path::PathBuf;

use avl_strmap::DuplicatePolicy;
use clap::{Parser, ValueEnum};

use crate::config::HarnessConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DuplicatesArg {
    Overwrite,
    Ignore,
}

impl From<DuplicatesArg> for DuplicatePolicy {
    fn from(arg: DuplicatesArg) -> Self {
        match arg {
            DuplicatesArg::Overwrite => DuplicatePolicy::Overwrite,
            DuplicatesArg::Ignore => DuplicatePolicy::Ignore,
        }
    }
}

/// Accepts decimal or `0x`-prefixed hexadecimal seeds.
fn parse_seed(s: &str) -> Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid seed {s:?}: {e}"))
}

#[derive(Debug, Parser)]
#[command(name = "avl-fuzz")]
#[command(bin_name = "avl-fuzz")]
#[command(about = "Fuzz an AVL tree with random inserts and deletes, then verify it", long_about = None)]
pub struct FuzzCli {
    /// TOML file with harness settings; flags override it.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_parser = parse_seed)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub key_size: Option<usize>,

    #[arg(short = 'n', long)]
    pub population: Option<usize>,

    #[arg(long)]
    pub operations: Option<usize>,

    #[arg(long)]
    pub delete_probability: Option<f64>,

    /// Check every invariant after each single insert or delete.
    #[arg(long)]
    pub check_every_op: bool,

    #[arg(long, value_enum)]
    pub duplicates: Option<DuplicatesArg>,

    /// Print the final tree.
    #[arg(long)]
    pub print: bool,
}

impl FuzzCli {
    /// Layers the command-line flags over `base`.
    pub fn apply(&self, mut base: HarnessConfig) -> HarnessConfig {
        if let Some(seed) = self.seed {
            base.seed = seed;
        }
        if let Some(key_size) = self.key_size {
            base.key_size = key_size;
        }
        if let Some(population) = self.population {
            base.population = population;
        }
        if let Some(operations) = self.operations {
            base.operations = operations;
        }
        if let Some(p) = self.delete_probability {
            base.delete_probability = p;
        }
        if self.check_every_op {
            base.check_every_op = true;
        }
        if let Some(duplicates) = self.duplicates {
            base.tree.duplicate_policy = duplicates.into();
        }
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_keep_base_config() {
        let cli = FuzzCli::try_parse_from(["avl-fuzz"]).unwrap();
        assert_eq!(cli.apply(HarnessConfig::default()), HarnessConfig::default());
    }

    #[test]
    fn flags_override_base_config() {
        let cli = FuzzCli::try_parse_from([
            "avl-fuzz",
            "--seed",
            "0x10",
            "-n",
            "5",
            "--operations",
            "7",
            "--check-every-op",
            "--duplicates",
            "ignore",
        ])
        .unwrap();
        let config = cli.apply(HarnessConfig::default());
        assert_eq!(config.seed, 16);
        assert_eq!(config.population, 5);
        assert_eq!(config.operations, 7);
        assert!(config.check_every_op);
        assert_eq!(config.tree.duplicate_policy, DuplicatePolicy::Ignore);
    }

    #[test]
    fn rejects_malformed_seed() {
        assert!(FuzzCli::try_parse_from(["avl-fuzz", "--seed", "0xZZ"]).is_err());
        assert_eq!(parse_seed("3735928559"), Ok(0xDEAD_BEEF));
    }
}
