use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use crate::streams::stream::Stream;
use crate::utils::file_parsing::{split_csv_preserving_quotes, strip_surrounding_quotes};
use std::fs::File;
use std::io::{BufRead, BufReader, Error, ErrorKind, Seek, SeekFrom};
use std::path::PathBuf;
use std::sync::Arc;

/// Finite stream over a WEKA ARFF file.
///
/// Supported attribute declarations: `numeric`/`real`/`integer` and nominal
/// label sets (`{a, b, c}`). `?` marks a missing value and is stored as NaN.
/// Rows that do not tokenize against the header (wrong arity, unknown
/// nominal label, unparsable number) are skipped, per the [`Stream`]
/// contract. String, date and relational attributes are rejected up front.
#[derive(Debug)]
pub struct ArffFileStream {
    header: Arc<InstanceHeader>,
    reader: BufReader<File>,
    data_offset: u64,
    pending: Option<DenseInstance>,
}

impl ArffFileStream {
    pub fn new(path: PathBuf, class_index: usize) -> Result<Self, Error> {
        let file = File::open(&path)?;
        let mut reader = BufReader::new(file);

        let (relation, attributes) = parse_arff_header(&mut reader)?;
        if attributes.is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidData,
                "ARFF header declares no attributes",
            ));
        }
        if class_index >= attributes.len() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!(
                    "class index {} out of range for {} attributes",
                    class_index,
                    attributes.len()
                ),
            ));
        }

        let data_offset = reader.stream_position()?;
        let header = Arc::new(InstanceHeader::new(relation, attributes, class_index));

        let mut stream = ArffFileStream {
            header,
            reader,
            data_offset,
            pending: None,
        };
        stream.advance()?;
        Ok(stream)
    }

    /// Reads forward until the next well-formed row or end of file.
    fn advance(&mut self) -> Result<(), Error> {
        self.pending = None;
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(());
            }
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('%') {
                continue;
            }
            if let Some(values) = self.parse_row(trimmed) {
                self.pending = Some(DenseInstance::new(Arc::clone(&self.header), values, 1.0));
                return Ok(());
            }
        }
    }

    fn parse_row(&self, line: &str) -> Option<Vec<f64>> {
        let tokens = split_csv_preserving_quotes(line);
        if tokens.len() != self.header.number_of_attributes() {
            return None;
        }

        let mut values = Vec::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            let token = strip_surrounding_quotes(token.trim());
            if token == "?" {
                values.push(f64::NAN);
                continue;
            }
            let attr = self.header.attribute_at_index(i)?;
            if let Some(nominal) = attr.as_any().downcast_ref::<NominalAttribute>() {
                values.push(nominal.index_of_value(token)? as f64);
            } else {
                values.push(token.parse::<f64>().ok()?);
            }
        }
        Some(values)
    }
}

impl Stream for ArffFileStream {
    fn header(&self) -> &InstanceHeader {
        &self.header
    }

    fn has_more_instances(&self) -> bool {
        self.pending.is_some()
    }

    fn next_instance(&mut self) -> Option<Box<dyn Instance>> {
        let instance = self.pending.take()?;
        if self.advance().is_err() {
            self.pending = None;
        }
        Some(Box::new(instance))
    }

    fn restart(&mut self) -> Result<(), Error> {
        self.reader.seek(SeekFrom::Start(self.data_offset))?;
        self.advance()
    }
}

/// Parses the declaration section up to and including `@data`, returning the
/// relation name and attribute list.
fn parse_arff_header(
    reader: &mut BufReader<File>,
) -> Result<(String, Vec<AttributeRef>), Error> {
    let mut relation = String::new();
    let mut attributes: Vec<AttributeRef> = Vec::new();
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(Error::new(
                ErrorKind::InvalidData,
                "ARFF file ended before @data",
            ));
        }
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }

        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("@relation") {
            relation = strip_surrounding_quotes(trimmed["@relation".len()..].trim()).to_string();
        } else if lower.starts_with("@attribute") {
            attributes.push(parse_attribute_declaration(
                trimmed["@attribute".len()..].trim(),
            )?);
        } else if lower == "@data" {
            return Ok((relation, attributes));
        } else {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("unrecognized ARFF declaration: {trimmed}"),
            ));
        }
    }
}

fn parse_attribute_declaration(decl: &str) -> Result<AttributeRef, Error> {
    let (name, spec) = split_attribute_name(decl)?;
    let name = strip_surrounding_quotes(&name).to_string();

    if let Some(body) = spec.strip_prefix('{') {
        let body = body.strip_suffix('}').ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidData,
                format!("unterminated nominal value set for attribute '{name}'"),
            )
        })?;
        let labels: Vec<String> = split_csv_preserving_quotes(body)
            .iter()
            .map(|l| strip_surrounding_quotes(l.trim()).to_string())
            .filter(|l| !l.is_empty())
            .collect();
        if labels.is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("empty nominal value set for attribute '{name}'"),
            ));
        }
        return Ok(Arc::new(NominalAttribute::from_labels(name, labels)));
    }

    match spec.to_ascii_lowercase().as_str() {
        "numeric" | "real" | "integer" => Ok(Arc::new(NumericAttribute::new(name))),
        other => Err(Error::new(
            ErrorKind::InvalidData,
            format!("unsupported attribute type '{other}' for attribute '{name}'"),
        )),
    }
}

/// Splits `name rest-of-spec`, honoring quoted names containing spaces.
fn split_attribute_name(decl: &str) -> Result<(String, String), Error> {
    let decl = decl.trim();
    let bytes = decl.as_bytes();
    if bytes.is_empty() {
        return Err(Error::new(ErrorKind::InvalidData, "empty @attribute line"));
    }

    if bytes[0] == b'\'' || bytes[0] == b'"' {
        let quote = bytes[0] as char;
        if let Some(end) = decl[1..].find(quote) {
            let name = decl[..end + 2].to_string();
            let spec = decl[end + 2..].trim().to_string();
            return Ok((name, spec));
        }
        return Err(Error::new(
            ErrorKind::InvalidData,
            format!("unterminated quoted attribute name: {decl}"),
        ));
    }

    match decl.split_once(char::is_whitespace) {
        Some((name, spec)) => Ok((name.to_string(), spec.trim().to_string())),
        None => Err(Error::new(
            ErrorKind::InvalidData,
            format!("attribute declaration missing a type: {decl}"),
        )),
    }
}
