// The in-session list of labeled captures, and its MNIST-style CSV form.

use crate::error::{Error, Result};
use crate::types::{Label, PIXEL_COUNT, Sample};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one sample at the end. Returns the new sample count.
    pub fn append(&mut self, label: Label, pixels: Vec<u8>) -> Result<usize> {
        self.samples.push(Sample::new(label, pixels)?);
        Ok(self.samples.len())
    }

    /// Drop every sample. Callers gate this behind a confirmation.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Header line followed by one line per sample, label first.
    /// Lines are joined with '\n' and there is no trailing newline.
    pub fn to_csv(&self) -> Result<String> {
        if self.samples.is_empty() {
            return Err(Error::EmptyDataset);
        }

        // ~4 bytes per value is a decent guess for mostly-black digits
        let mut csv = String::with_capacity((self.samples.len() + 1) * PIXEL_COUNT * 4);
        csv.push_str(&csv_header());
        for sample in &self.samples {
            csv.push('\n');
            csv.push_str(&sample.label().to_string());
            for p in sample.pixels() {
                csv.push(',');
                csv.push_str(&p.to_string());
            }
        }
        Ok(csv)
    }

    /// Name the exported file after the current sample count.
    pub fn export_file_name(&self) -> String {
        export_file_name(self.samples.len())
    }

    /// Serialize and write to `dir/mnist_dataset_<N>_samples.csv`.
    pub fn export(&self, dir: &Path) -> Result<PathBuf> {
        let csv = self.to_csv()?;
        write_export(dir, &self.export_file_name(), &csv)
    }
}

/// `label,pixel0,pixel1,...,pixel783`
pub fn csv_header() -> String {
    let mut header = String::from("label");
    for i in 0..PIXEL_COUNT {
        header.push_str(",pixel");
        header.push_str(&i.to_string());
    }
    header
}

pub fn export_file_name(count: usize) -> String {
    format!("mnist_dataset_{count}_samples.csv")
}

/// Write already-serialized CSV into `dir`, creating the directory if needed.
pub fn write_export(dir: &Path, file_name: &str, csv: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, csv)?;
    info!("Exported {} bytes to {}", csv.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn label(v: u8) -> Label {
        Label::new(v).unwrap()
    }

    fn ramp() -> Vec<u8> {
        (0..PIXEL_COUNT).map(|i| (i % 256) as u8).collect()
    }

    #[test]
    fn header_names_every_column() {
        let header = csv_header();
        let cols: Vec<&str> = header.split(',').collect();
        assert_eq!(cols.len(), PIXEL_COUNT + 1);
        assert_eq!(cols[0], "label");
        assert_eq!(cols[1], "pixel0");
        assert_eq!(cols[PIXEL_COUNT], "pixel783");
    }

    #[test]
    fn single_sample_serializes_to_two_lines() {
        let mut ds = Dataset::new();
        let pixels = ramp();
        assert_eq!(ds.append(label(3), pixels.clone()).unwrap(), 1);

        let csv = ds.to_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], csv_header());

        let expected: Vec<String> = std::iter::once("3".to_string())
            .chain(pixels.iter().map(|p| p.to_string()))
            .collect();
        assert_eq!(lines[1], expected.join(","));
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn rows_keep_insertion_order() {
        let mut ds = Dataset::new();
        for v in [7, 1, 9] {
            ds.append(label(v), vec![v; PIXEL_COUNT]).unwrap();
        }
        let csv = ds.to_csv().unwrap();
        let labels: Vec<&str> = csv.lines().skip(1).map(|l| l.split(',').next().unwrap()).collect();
        assert_eq!(labels, ["7", "1", "9"]);
    }

    #[test]
    fn empty_dataset_refuses_to_serialize() {
        let mut ds = Dataset::new();
        assert!(matches!(ds.to_csv(), Err(Error::EmptyDataset)));

        ds.append(label(0), vec![0; PIXEL_COUNT]).unwrap();
        ds.clear();
        assert!(ds.is_empty());
        assert!(matches!(ds.to_csv(), Err(Error::EmptyDataset)));
    }

    #[test]
    fn short_vector_is_rejected() {
        let mut ds = Dataset::new();
        assert!(matches!(ds.append(label(1), vec![0; 783]), Err(Error::PixelCount { .. })));
        assert_eq!(ds.len(), 0);
    }

    #[test]
    fn export_writes_named_file() {
        let dir = std::env::temp_dir().join(format!("mnist-drawer-export-{}", std::process::id()));
        let mut ds = Dataset::new();
        ds.append(label(2), ramp()).unwrap();
        ds.append(label(5), vec![255; PIXEL_COUNT]).unwrap();

        let path = ds.export(&dir).unwrap();
        assert_eq!(path.file_name().unwrap(), "mnist_dataset_2_samples.csv");
        assert_eq!(fs::read_to_string(&path).unwrap(), ds.to_csv().unwrap());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn export_of_empty_dataset_writes_nothing() {
        let dir = std::env::temp_dir().join(format!("mnist-drawer-empty-{}", std::process::id()));
        assert!(matches!(Dataset::new().export(&dir), Err(Error::EmptyDataset)));
        assert!(!dir.join(export_file_name(0)).exists());
    }
}
