//! Rendering of command results as a table, JSON or YAML.

use std::io::Write;

use anyhow::Context;
use clap::ValueEnum;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

/// Write `data` to `writer` as a single newline-terminated document.
///
/// Structured formats serialize `data` itself. The table is built from
/// `rows`, which only runs for [`OutputFormat::Table`], so a command can
/// flatten its results for humans without changing the machine shape.
pub fn write_output<S, R, W>(
    writer: &mut W,
    format: OutputFormat,
    data: &S,
    rows: impl FnOnce(&S) -> Vec<R>,
) -> anyhow::Result<()>
where
    S: Serialize + ?Sized,
    R: Tabled,
    W: Write,
{
    let rendered = match format {
        OutputFormat::Table => {
            let mut table = Table::new(rows(data));
            table.with(Style::sharp());
            table.to_string()
        }
        OutputFormat::Json => {
            serde_json::to_string_pretty(data).context("JSON serialization failed")?
        }
        OutputFormat::Yaml => serde_yaml::to_string(data).context("YAML serialization failed")?,
    };
    writeln!(writer, "{}", rendered.trim_end_matches('\n'))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Tabled)]
    struct Row {
        #[tabled(rename = "SOURCE")]
        source: String,
        #[tabled(rename = "DESTINATION")]
        destination: String,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                source: "/ctr/run/secret".into(),
                destination: "/run/secret".into(),
            },
            Row {
                source: "/ctr/run/secrets".into(),
                destination: "/run/secrets".into(),
            },
        ]
    }

    fn render(format: OutputFormat, data: &[Row]) -> String {
        let mut buffer = Vec::new();
        write_output(&mut buffer, format, data, |d| d.to_vec()).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[rstest]
    #[case("table", OutputFormat::Table)]
    #[case("Table", OutputFormat::Table)]
    #[case("json", OutputFormat::Json)]
    #[case("JSON", OutputFormat::Json)]
    #[case("yaml", OutputFormat::Yaml)]
    fn test_format_names_ignore_case(#[case] name: &str, #[case] expected: OutputFormat) {
        assert_eq!(OutputFormat::from_str(name, true).unwrap(), expected);
    }

    #[rstest]
    #[case("xml")]
    #[case("yml")]
    #[case("")]
    fn test_unknown_format_names_rejected(#[case] name: &str) {
        assert!(OutputFormat::from_str(name, true).is_err());
    }

    #[rstest]
    #[case(OutputFormat::Table, "DESTINATION")]
    #[case(OutputFormat::Json, "\"destination\": \"/run/secrets\"")]
    #[case(OutputFormat::Yaml, "destination: /run/secrets")]
    fn test_rendering_per_format(#[case] format: OutputFormat, #[case] needle: &str) {
        let output = render(format, &rows());
        assert!(output.contains(needle), "{format:?} output: {output}");
        assert!(output.ends_with('\n'));
        assert!(!output.ends_with("\n\n"));
    }

    #[test]
    fn test_structured_output_parses_back() {
        let data = rows();

        let parsed: Vec<Row> = serde_json::from_str(&render(OutputFormat::Json, &data)).unwrap();
        assert_eq!(parsed, data);

        let parsed: Vec<Row> = serde_yaml::from_str(&render(OutputFormat::Yaml, &data)).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn test_rows_only_built_for_table() {
        let mut buffer = Vec::new();
        write_output(&mut buffer, OutputFormat::Json, &rows(), |_| -> Vec<Row> {
            panic!("rows built for JSON output")
        })
        .unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap().trim_end(),
            serde_json::to_string_pretty(&rows()).unwrap()
        );
    }

    #[test]
    fn test_empty_json_is_bare_array() {
        assert_eq!(render(OutputFormat::Json, &[]), "[]\n");
    }
}
