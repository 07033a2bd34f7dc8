//! Option parsing shared by every pattern-producing command.

use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use log::info;

use mandala::{PaletteKind, Pattern, PatternConfig, PatternStyle};

/// Pattern settings parsed from the command line.
pub struct PatternArgs {
    pub config: PatternConfig,
    pub seed: Option<u64>,
    /// Arguments not recognised here, in their original order
    pub rest: Vec<String>,
}

impl PatternArgs {
    /// Seed from `--seed`, or a fresh random one.
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Generate the pattern these arguments describe.
    pub fn generate(&self) -> Result<Pattern> {
        let seed = self.seed();
        let pattern = Pattern::generate(&self.config, seed)?;
        info!(
            "Generated {} pattern: {} layers, {} shapes (seed {})",
            pattern.style.name(),
            pattern.layers.len(),
            pattern.shape_count(),
            seed
        );
        Ok(pattern)
    }
}

fn parse_value<T: FromStr>(flag: &str, value: Option<&String>) -> Result<T> {
    let value = value.ok_or_else(|| anyhow!("{} needs a value", flag))?;
    value
        .parse()
        .map_err(|_| anyhow!("invalid value for {}: '{}'", flag, value))
}

/// Parse pattern options.
///
/// `--config` is applied first wherever it appears, so explicit flags
/// always override values from the file.
pub fn parse_pattern_args(args: &[String]) -> Result<PatternArgs> {
    let mut config = match args.iter().position(|a| a == "--config") {
        Some(i) => {
            let path = args
                .get(i + 1)
                .ok_or_else(|| anyhow!("--config needs a file path"))?;
            PatternConfig::load(Path::new(path))
                .with_context(|| format!("loading config {}", path))?
        }
        None => PatternConfig::default(),
    };

    let mut seed = None;
    let mut rest = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args.get(i + 1);
        match flag {
            "--config" => {
                i += 1;
            }
            "--seed" => {
                seed = Some(parse_value(flag, value)?);
                i += 1;
            }
            "--style" => {
                let name: String = parse_value(flag, value)?;
                config.style = PatternStyle::from_name(&name)
                    .ok_or_else(|| anyhow!("unknown style '{}' (try `mandala palettes`)", name))?;
                i += 1;
            }
            "--palette" => {
                let name: String = parse_value(flag, value)?;
                config.palette = PaletteKind::from_name(&name)
                    .ok_or_else(|| anyhow!("unknown palette '{}' (try `mandala palettes`)", name))?;
                i += 1;
            }
            "--colors" => {
                let list: String = parse_value(flag, value)?;
                config.colors = list
                    .split(',')
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect();
                config.palette = PaletteKind::Custom;
                i += 1;
            }
            "--size" => {
                config.size = parse_value(flag, value)?;
                i += 1;
            }
            "--layers" => {
                config.layers = parse_value(flag, value)?;
                i += 1;
            }
            "--shapes" => {
                config.shape_count = parse_value(flag, value)?;
                i += 1;
            }
            "--sides" => {
                config.shape_sides = parse_value(flag, value)?;
                i += 1;
            }
            "--depth" => {
                config.depth = parse_value(flag, value)?;
                i += 1;
            }
            "--line-width" => {
                config.line_width = parse_value(flag, value)?;
                i += 1;
            }
            _ => rest.push(args[i].clone()),
        }
        i += 1;
    }

    config.validate()?;
    Ok(PatternArgs { config, seed, rest })
}

/// Value following `flag` in the leftover arguments.
pub fn take_value<'a>(rest: &'a [String], names: &[&str]) -> Result<Option<&'a str>> {
    match rest.iter().position(|a| names.contains(&a.as_str())) {
        Some(i) => match rest.get(i + 1) {
            Some(v) => Ok(Some(v.as_str())),
            None => bail!("{} needs a value", rest[i]),
        },
        None => Ok(None),
    }
}

pub fn has_flag(rest: &[String], names: &[&str]) -> bool {
    rest.iter().any(|a| names.contains(&a.as_str()))
}

/// Complain about anything no parser consumed.
pub fn reject_unknown(rest: &[String], known_flags: &[&str], value_flags: &[&str]) -> Result<()> {
    let mut i = 0;
    while i < rest.len() {
        let arg = rest[i].as_str();
        if value_flags.contains(&arg) {
            i += 2;
            continue;
        }
        if !known_flags.contains(&arg) {
            bail!("unexpected argument '{}'", arg);
        }
        i += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flags_override_defaults() {
        let parsed = parse_pattern_args(&args(&[
            "--seed", "9", "--style", "rings", "--layers", "6", "-o", "out.svg",
        ]))
        .unwrap();
        assert_eq!(parsed.seed, Some(9));
        assert_eq!(parsed.seed(), 9);
        assert_eq!(parsed.config.style, PatternStyle::Rings);
        assert_eq!(parsed.config.layers, 6);
        assert_eq!(parsed.rest, args(&["-o", "out.svg"]));
    }

    #[test]
    fn colors_switch_to_custom_palette() {
        let parsed = parse_pattern_args(&args(&["--colors", "#ff0000, teal"])).unwrap();
        assert_eq!(parsed.config.palette, PaletteKind::Custom);
        assert_eq!(parsed.config.colors, args(&["#ff0000", "teal"]));
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(parse_pattern_args(&args(&["--layers", "many"])).is_err());
        assert!(parse_pattern_args(&args(&["--sides"])).is_err());
        assert!(parse_pattern_args(&args(&["--sides", "2"])).is_err());
        assert!(parse_pattern_args(&args(&["--style", "spiral"])).is_err());
    }

    #[test]
    fn leftover_helpers() {
        let rest = args(&["--out", "dir", "--by-color"]);
        assert_eq!(take_value(&rest, &["--out"]).unwrap(), Some("dir"));
        assert_eq!(take_value(&rest, &["-o"]).unwrap(), None);
        assert!(has_flag(&rest, &["--by-color"]));
        assert!(reject_unknown(&rest, &["--by-color"], &["--out"]).is_ok());
        assert!(reject_unknown(&rest, &[], &["--out"]).is_err());
        assert!(take_value(&args(&["--out"]), &["--out"]).is_err());
    }
}
