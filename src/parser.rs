use crate::config::InputConfig;
use crate::error::{Error, Result};
use regex::Regex;

/// One input line: a taxonomy path and the frequency attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub path: Vec<String>,
    pub weight: u64,
}

impl Record {
    pub fn new<S: Into<String>>(path: impl IntoIterator<Item = S>, weight: u64) -> Self {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            weight,
        }
    }
}

pub struct RecordParser {
    line_re: Regex,
    path_delimiter: char,
}

impl RecordParser {
    pub fn new(config: &InputConfig) -> Result<Self> {
        if config.path_delimiter == config.field_delimiter {
            return Err(Error::InvalidDelimiters {
                message: format!(
                    "path and field delimiter are both {:?}",
                    config.field_delimiter
                ),
            });
        }
        let is_line_break = |c: char| matches!(c, '\n' | '\r');
        if is_line_break(config.field_delimiter) || is_line_break(config.path_delimiter) {
            return Err(Error::InvalidDelimiters {
                message: "line breaks cannot be used as delimiters".to_string(),
            });
        }
        let field = regex::escape(&config.field_delimiter.to_string());
        let pattern = format!(r"^(?P<path>[^{field}]*){field}(?P<weight>.*)$");
        let line_re = Regex::new(&pattern).map_err(|err| Error::InvalidDelimiters {
            message: err.to_string(),
        })?;
        Ok(Self {
            line_re,
            path_delimiter: config.path_delimiter,
        })
    }

    /// Parses one non-blank line. `line_no` is 1-based and only used for errors.
    pub fn parse_line(&self, line: &str, line_no: usize) -> Result<Record> {
        let Some(caps) = self.line_re.captures(line) else {
            return Err(Error::MalformedRecord {
                line: line_no,
                reason: format!("missing weight field in {line:?}"),
            });
        };
        let path = caps.name("path").map(|m| m.as_str()).unwrap_or_default();
        let raw_weight = caps.name("weight").map(|m| m.as_str()).unwrap_or_default();
        let weight = raw_weight
            .trim()
            .parse::<u64>()
            .map_err(|err| Error::MalformedRecord {
                line: line_no,
                reason: format!("invalid weight {:?}: {err}", raw_weight.trim()),
            })?;
        let path = if path.is_empty() {
            Vec::new()
        } else {
            path.split(self.path_delimiter).map(str::to_string).collect()
        };
        Ok(Record { path, weight })
    }

    pub fn parse(&self, input: &str) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        for (idx, raw_line) in input.lines().enumerate() {
            let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
            if line.trim().is_empty() {
                continue;
            }
            records.push(self.parse_line(line, idx + 1)?);
        }
        Ok(records)
    }
}

pub fn parse_records(input: &str, config: &InputConfig) -> Result<Vec<Record>> {
    let records = RecordParser::new(config)?.parse(input)?;
    tracing::debug!(records = records.len(), "parsed taxonomy records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Vec<Record>> {
        parse_records(input, &InputConfig::default())
    }

    #[test]
    fn parses_tab_separated_records() {
        let records = parse("A\t3\nA;B\t2\nA;C\t5\n").unwrap();
        assert_eq!(
            records,
            vec![
                Record::new(["A"], 3),
                Record::new(["A", "B"], 2),
                Record::new(["A", "C"], 5),
            ]
        );
    }

    #[test]
    fn tolerates_crlf_blank_lines_and_padded_weights() {
        let records = parse("Animalia;Chordata\t 12 \r\n\r\n\nPlantae\t4\r\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].path, vec!["Animalia", "Chordata"]);
        assert_eq!(records[0].weight, 12);
        assert_eq!(records[1].weight, 4);
    }

    #[test]
    fn empty_path_is_root_level() {
        let records = parse("\t9\n").unwrap();
        assert_eq!(records, vec![Record::new(Vec::<String>::new(), 9)]);
    }

    #[test]
    fn keeps_segments_verbatim() {
        let records = parse("Homo sapiens;  neanderthalensis\t1").unwrap();
        assert_eq!(records[0].path, vec!["Homo sapiens", "  neanderthalensis"]);
    }

    #[test]
    fn missing_weight_is_malformed() {
        let err = parse("A\t1\nA;B\n").unwrap_err();
        match err {
            Error::MalformedRecord { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("missing weight"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_and_negative_weights_are_malformed() {
        for input in ["A\tlots", "A\t-3", "A\t1\t2", "A\t"] {
            let err = parse(input).unwrap_err();
            assert!(
                matches!(err, Error::MalformedRecord { line: 1, .. }),
                "{input:?} -> {err}"
            );
        }
    }

    #[test]
    fn custom_delimiters() {
        let config = InputConfig {
            path_delimiter: '/',
            field_delimiter: ',',
        };
        let records = parse_records("a/b,4\n", &config).unwrap();
        assert_eq!(records, vec![Record::new(["a", "b"], 4)]);
    }

    #[test]
    fn rejects_identical_delimiters() {
        let config = InputConfig {
            path_delimiter: ',',
            field_delimiter: ',',
        };
        assert!(matches!(
            parse_records("a,1", &config),
            Err(Error::InvalidDelimiters { .. })
        ));
    }
}
