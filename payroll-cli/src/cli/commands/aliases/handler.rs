//! Aliases command handler

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use colored::*;

use crate::config::Config;
use crate::consolidate::Field;
use crate::services::aliases::{AliasResolver, MatchKind};

/// Print every field with the headers that resolve to it
pub fn handle_aliases_command(config: &Config) -> Result<ExitCode> {
    let resolver = AliasResolver::with_custom(&config.custom_aliases()?);
    let mut stdout = std::io::stdout().lock();
    write_alias_table(&resolver, &mut stdout)?;
    Ok(ExitCode::SUCCESS)
}

fn write_alias_table(resolver: &AliasResolver, out: &mut impl Write) -> Result<()> {
    for field in Field::ALL {
        let title = if field.is_output() {
            field.label().bold()
        } else {
            format!("{} (merged/split, not written)", field.label()).dimmed()
        };
        writeln!(out, "{}", title)?;

        for entry in resolver.aliases_for(field) {
            let label = match (entry.kind, entry.active) {
                (_, false) => format!("{} (shadowed)", entry.label).dimmed(),
                (MatchKind::Custom, true) => entry.label.cyan(),
                _ => entry.label.normal(),
            };
            writeln!(out, "  {} {}", label, entry.kind.label().dimmed())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_table_lists_fields_in_output_order() {
        let custom = vec![(
            Field::Phone,
            vec!["movil".to_string(), "correo".to_string()],
        )];
        let resolver = AliasResolver::with_custom(&custom);

        let mut out = Vec::new();
        write_alias_table(&resolver, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        let nombre = output.find("nombre").unwrap();
        let rut = output.find("rut").unwrap();
        let area = output.find("área").unwrap();
        assert!(nombre < rut && rut < area);

        assert!(output.contains("movil"));
        assert!(output.contains("correo (shadowed)"));
        assert!(output.contains("correo electronico"));
        assert!(output.contains("full name (merged/split, not written)"));
    }
}
