use crate::evaluation::Snapshot;
use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;

pub enum TraceFormat {
    Csv,
    Tsv,
    Json,
}

/// Ordered series of [`Snapshot`]s collected while a task runs, exportable
/// for offline inspection. Delimited exports emit the fixed snapshot
/// columns; the JSON export also carries each snapshot's extras.
pub struct EvaluationTrace {
    entries: Vec<Snapshot>,
}

impl EvaluationTrace {
    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.push(snapshot)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.entries.last()
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, fmt: TraceFormat) -> Result<(), Error> {
        match fmt {
            TraceFormat::Csv => self.export_with_delimiter(path, ','),
            TraceFormat::Tsv => self.export_with_delimiter(path, '\t'),
            TraceFormat::Json => self.export_json(path),
        }
    }

    fn export_with_delimiter<P: AsRef<Path>>(&self, path: P, delimiter: char) -> Result<(), Error> {
        let mut w = File::create(path)?;
        writeln!(
            w,
            "instances_seen{d}accuracy{d}kappa{d}ram_hours{d}seconds",
            d = delimiter
        )?;
        for s in &self.entries {
            writeln!(
                w,
                "{}{d}{:.12}{d}{:.12}{d}{:.12}{d}{:.6}",
                s.instances_seen,
                s.accuracy,
                s.kappa,
                s.ram_hours,
                s.seconds,
                d = delimiter
            )?;
        }
        Ok(())
    }

    fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut w = File::create(path)?;
        writeln!(w, "[")?;
        for (i, s) in self.entries.iter().enumerate() {
            let extras = s
                .extras
                .iter()
                .map(|(k, v)| format!("\"{k}\":{v}"))
                .collect::<Vec<_>>()
                .join(",");
            writeln!(
                w,
                "  {{\"instances_seen\":{},\"accuracy\":{},\"kappa\":{},\"ram_hours\":{},\"seconds\":{},\"extras\":{{{}}}}}{}",
                s.instances_seen,
                s.accuracy,
                s.kappa,
                s.ram_hours,
                s.seconds,
                extras,
                if i + 1 == self.entries.len() { "" } else { "," }
            )?;
        }
        writeln!(w, "]")?;
        Ok(())
    }
}

impl Default for EvaluationTrace {
    fn default() -> Self {
        Self { entries: vec![] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::NamedTempFile;

    fn snap(seen: u64, acc: f64, kap: f64, ram: f64, secs: f64) -> Snapshot {
        Snapshot {
            instances_seen: seen,
            accuracy: acc,
            kappa: kap,
            ram_hours: ram,
            seconds: secs,
            extras: BTreeMap::new(),
        }
    }

    #[test]
    fn default_is_empty_and_latest_none() {
        let trace = EvaluationTrace::default();
        assert_eq!(trace.len(), 0);
        assert!(trace.is_empty());
        assert!(trace.latest().is_none());
    }

    #[test]
    fn push_appends_and_latest_points_at_the_last() {
        let mut trace = EvaluationTrace::default();
        trace.push(snap(10, 1.0, 0.5, 0.125, 2.5));
        trace.push(snap(20, 0.25, 0.0, 1.5, 3.0));
        assert_eq!(trace.len(), 2);
        let last = trace.latest().unwrap();
        assert_eq!(last.instances_seen, 20);
        assert_eq!(last.accuracy, 0.25);
    }

    #[test]
    fn export_csv_with_two_rows() {
        let mut trace = EvaluationTrace::default();
        trace.push(snap(10, 1.0, 0.5, 0.125, 2.5));
        trace.push(snap(20, 0.25, 0.0, 1.5, 3.0));

        let tf = NamedTempFile::new().unwrap();
        trace.export(tf.path(), TraceFormat::Csv).unwrap();

        let got = fs::read_to_string(tf.path()).unwrap();
        let exp = "\
instances_seen,accuracy,kappa,ram_hours,seconds
10,1.000000000000,0.500000000000,0.125000000000,2.500000
20,0.250000000000,0.000000000000,1.500000000000,3.000000
";
        assert_eq!(got, exp);
    }

    #[test]
    fn export_tsv_uses_tabs() {
        let mut trace = EvaluationTrace::default();
        trace.push(snap(10, 1.0, 0.5, 0.125, 2.5));

        let tf = NamedTempFile::new().unwrap();
        trace.export(tf.path(), TraceFormat::Tsv).unwrap();

        let got = fs::read_to_string(tf.path()).unwrap();
        assert!(got.starts_with("instances_seen\taccuracy\tkappa"));
        assert!(got.contains("10\t1.000000000000"));
    }

    #[test]
    fn export_json_includes_extras() {
        let mut trace = EvaluationTrace::default();
        let mut s = snap(10, 1.0, 0.5, 0.125, 2.5);
        s.extras.insert("f1".into(), 0.75);
        trace.push(s);

        let tf = NamedTempFile::new().unwrap();
        trace.export(tf.path(), TraceFormat::Json).unwrap();

        let got = fs::read_to_string(tf.path()).unwrap();
        let exp = "\
[
  {\"instances_seen\":10,\"accuracy\":1,\"kappa\":0.5,\"ram_hours\":0.125,\"seconds\":2.5,\"extras\":{\"f1\":0.75}}
]
";
        assert_eq!(got, exp);
    }

    #[test]
    fn export_empty_trace() {
        let trace = EvaluationTrace::default();

        let tf_csv = NamedTempFile::new().unwrap();
        trace.export(tf_csv.path(), TraceFormat::Csv).unwrap();
        assert_eq!(
            fs::read_to_string(tf_csv.path()).unwrap(),
            "instances_seen,accuracy,kappa,ram_hours,seconds\n"
        );

        let tf_json = NamedTempFile::new().unwrap();
        trace.export(tf_json.path(), TraceFormat::Json).unwrap();
        assert_eq!(fs::read_to_string(tf_json.path()).unwrap(), "[\n]\n");
    }
}
