use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use thiserror::Error;
use uuid::Uuid;

pub const DEFAULT_MAX_WIDTH: u32 = 1000;
pub const DEFAULT_QUALITY: u8 = 80;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("encode {path}: {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type JobOutcome = (PathBuf, std::result::Result<String, MediaError>);

// Photo jobs run off the wizard thread and report back over a channel.
// Results merge in completion order, not submission order; a failed file
// is skipped while the rest proceed.
pub struct ImagePipeline {
    output_dir: PathBuf,
    max_width: u32,
    quality: u8,
    tx: mpsc::Sender<JobOutcome>,
    rx: mpsc::Receiver<JobOutcome>,
    pending: usize,
    handles: Vec<JoinHandle<()>>,
}

impl ImagePipeline {
    pub fn new(output_dir: &Path, max_width: u32, quality: u8) -> Result<ImagePipeline> {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("create image dir {}", output_dir.display()))?;
        let (tx, rx) = mpsc::channel();
        Ok(ImagePipeline {
            output_dir: output_dir.to_path_buf(),
            max_width,
            quality,
            tx,
            rx,
            pending: 0,
            handles: Vec::new(),
        })
    }

    pub fn submit(&mut self, source: PathBuf) {
        let tx = self.tx.clone();
        let output_dir = self.output_dir.clone();
        let max_width = self.max_width;
        let quality = self.quality;
        self.pending += 1;
        self.handles.push(thread::spawn(move || {
            let outcome = process_one(&source, &output_dir, max_width, quality);
            // Receiver gone means the session ended; nothing left to report.
            let _ = tx.send((source, outcome));
        }));
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    // Non-blocking: whatever has finished since the last call.
    pub fn drain(&mut self) -> Vec<JobOutcome> {
        let mut done = Vec::new();
        while let Ok(outcome) = self.rx.try_recv() {
            self.pending -= 1;
            done.push(outcome);
        }
        done
    }

    // Blocks until every submitted job has reported.
    pub fn finish(&mut self) -> Vec<JobOutcome> {
        let mut done = Vec::new();
        while self.pending > 0 {
            match self.rx.recv() {
                Ok(outcome) => {
                    self.pending -= 1;
                    done.push(outcome);
                }
                Err(_) => break,
            }
        }
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
        done
    }
}

// Bounded-width JPEG re-encode; the returned name is the stored reference.
fn process_one(
    source: &Path,
    output_dir: &Path,
    max_width: u32,
    quality: u8,
) -> std::result::Result<String, MediaError> {
    let img = image::open(source).map_err(|source_err| MediaError::Decode {
        path: source.to_path_buf(),
        source: source_err,
    })?;
    let img = if img.width() > max_width {
        img.resize(max_width, u32::MAX, FilterType::Triangle)
    } else {
        img
    };

    let name = format!("{}.jpg", Uuid::new_v4());
    let dest = output_dir.join(&name);
    let file = File::create(&dest).map_err(|source_err| MediaError::Write {
        path: dest.clone(),
        source: source_err,
    })?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, quality);
    // JPEG has no alpha channel; flatten before encoding.
    image::DynamicImage::ImageRgb8(img.to_rgb8())
        .write_with_encoder(encoder)
        .map_err(|source_err| MediaError::Encode {
            path: dest.clone(),
            source: source_err,
        })?;
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn write_test_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_fn(width, height, |x, _| Rgb([(x % 256) as u8, 80, 120]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn wide_images_are_bounded_and_reencoded() {
        let tmp = tempfile::tempdir().unwrap();
        let source = write_test_png(tmp.path(), "wide.png", 2000, 500);
        let out_dir = tmp.path().join("images");

        let mut pipeline = ImagePipeline::new(&out_dir, DEFAULT_MAX_WIDTH, DEFAULT_QUALITY).unwrap();
        pipeline.submit(source.clone());
        let results = pipeline.finish();
        assert_eq!(results.len(), 1);
        let stored = results[0].1.as_ref().unwrap();
        assert!(stored.ends_with(".jpg"));

        let reopened = image::open(out_dir.join(stored)).unwrap();
        assert_eq!(reopened.width(), DEFAULT_MAX_WIDTH);
    }

    #[test]
    fn narrow_images_keep_their_width() {
        let tmp = tempfile::tempdir().unwrap();
        let source = write_test_png(tmp.path(), "small.png", 320, 200);
        let out_dir = tmp.path().join("images");

        let mut pipeline = ImagePipeline::new(&out_dir, DEFAULT_MAX_WIDTH, DEFAULT_QUALITY).unwrap();
        pipeline.submit(source);
        let results = pipeline.finish();
        let stored = results[0].1.as_ref().unwrap();
        assert_eq!(image::open(out_dir.join(stored)).unwrap().width(), 320);
    }

    #[test]
    fn a_failing_file_does_not_sink_the_batch() {
        let tmp = tempfile::tempdir().unwrap();
        let good = write_test_png(tmp.path(), "good.png", 100, 100);
        let bad = tmp.path().join("not-an-image.png");
        std::fs::write(&bad, b"plain text").unwrap();
        let out_dir = tmp.path().join("images");

        let mut pipeline = ImagePipeline::new(&out_dir, DEFAULT_MAX_WIDTH, DEFAULT_QUALITY).unwrap();
        pipeline.submit(good);
        pipeline.submit(bad.clone());
        let results = pipeline.finish();
        assert_eq!(results.len(), 2);
        let failures: Vec<_> = results.iter().filter(|(_, r)| r.is_err()).collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, bad);
    }
}
