#![allow(clippy::cast_precision_loss)]
use std::fs::File;
use std::io::Write;
use std::path::Path;

use approx::assert_relative_eq;
use flate2::write::GzEncoder;
use flate2::Compression;
use sbv_io::{load_volume, read_nifti, AffineSource, Error, LoadOptions};

const NIFTI_FLOAT32: i16 = 16;

struct Fixture {
    dims: Vec<usize>,
    scl_slope: f32,
    scl_inter: f32,
    sform: Option<[[f32; 4]; 3]>,
}

impl Fixture {
    fn new(dims: &[usize]) -> Self {
        Self {
            dims: dims.to_vec(),
            scl_slope: 1.0,
            scl_inter: 0.0,
            sform: None,
        }
    }

    // Value stored at a voxel: x + 10y + 100z + 1000t
    fn stored(idx: &[usize]) -> f32 {
        idx.iter()
            .zip([1usize, 10, 100, 1000])
            .map(|(i, w)| i * w)
            .sum::<usize>() as f32
    }

    // NIfTI-1 single-file image: 348-byte header, 4-byte extender, data.
    fn bytes(&self) -> Vec<u8> {
        let mut hdr = vec![0u8; 352];
        put_i32(&mut hdr, 0, 348);
        put_i16(&mut hdr, 40, i16::try_from(self.dims.len()).unwrap());
        for (i, &d) in self.dims.iter().enumerate() {
            put_i16(&mut hdr, 42 + 2 * i, i16::try_from(d).unwrap());
        }
        put_i16(&mut hdr, 70, NIFTI_FLOAT32);
        put_i16(&mut hdr, 72, 32);
        for i in 0..8 {
            put_f32(&mut hdr, 76 + 4 * i, 1.0);
        }
        put_f32(&mut hdr, 108, 352.0);
        put_f32(&mut hdr, 112, self.scl_slope);
        put_f32(&mut hdr, 116, self.scl_inter);
        if let Some(rows) = self.sform {
            put_i16(&mut hdr, 254, 1);
            for (r, row) in rows.iter().enumerate() {
                for (c, &v) in row.iter().enumerate() {
                    put_f32(&mut hdr, 280 + 16 * r + 4 * c, v);
                }
            }
        }
        hdr[344..348].copy_from_slice(b"n+1\0");

        // x varies fastest on disk
        let total: usize = self.dims.iter().product();
        let mut idx = vec![0usize; self.dims.len()];
        for _ in 0..total {
            hdr.extend_from_slice(&Self::stored(&idx).to_le_bytes());
            for (axis, i) in idx.iter_mut().enumerate() {
                *i += 1;
                if *i < self.dims[axis] {
                    break;
                }
                *i = 0;
            }
        }
        hdr
    }

    fn write(&self, path: &Path) {
        let mut file = File::create(path).unwrap();
        file.write_all(&self.bytes()).unwrap();
    }

    fn write_gz(&self, path: &Path) {
        let file = File::create(path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(&self.bytes()).unwrap();
        encoder.finish().unwrap();
    }
}

fn put_i16(buf: &mut [u8], at: usize, v: i16) {
    buf[at..at + 2].copy_from_slice(&v.to_le_bytes());
}

fn put_i32(buf: &mut [u8], at: usize, v: i32) {
    buf[at..at + 4].copy_from_slice(&v.to_le_bytes());
}

fn put_f32(buf: &mut [u8], at: usize, v: f32) {
    buf[at..at + 4].copy_from_slice(&v.to_le_bytes());
}

#[test]
fn test_load_3d_with_scaling() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("brain.nii");
    let mut fixture = Fixture::new(&[3, 4, 5]);
    fixture.scl_slope = 2.0;
    fixture.scl_inter = 1.0;
    fixture.write(&path);

    let volume = load_volume(&path, &LoadOptions::default()).unwrap();
    assert_eq!(volume.shape(), [3, 4, 5, 1]);
    for (x, y, z) in [(0, 0, 0), (2, 1, 3), (1, 3, 4)] {
        let expected = 2.0 * Fixture::stored(&[x, y, z]) + 1.0;
        assert_relative_eq!(volume.get(x, y, z, 0).unwrap(), expected);
    }

    let range = volume.intensity_range();
    assert_relative_eq!(range.min, 1.0);
    assert_relative_eq!(range.max, 2.0 * 432.0 + 1.0);
}

#[test]
fn test_load_4d_reorients_lps() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bold.nii");
    let mut fixture = Fixture::new(&[2, 3, 2, 2]);
    fixture.sform = Some([
        [-1.0, 0.0, 0.0, 0.0],
        [0.0, -1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
    ]);
    fixture.write(&path);

    let image = read_nifti(&path).unwrap();
    assert_eq!(image.affine_source, AffineSource::Sform);

    let canonical = load_volume(&path, &LoadOptions::default()).unwrap();
    assert_eq!(canonical.shape(), [2, 3, 2, 2]);
    assert_relative_eq!(
        canonical.get(0, 0, 1, 1).unwrap(),
        Fixture::stored(&[1, 2, 1, 1])
    );

    let raw = load_volume(&path, &LoadOptions { canonical: false }).unwrap();
    assert_relative_eq!(raw.get(0, 0, 1, 1).unwrap(), Fixture::stored(&[0, 0, 1, 1]));
}

#[test]
fn test_load_gzipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("brain.nii.gz");
    Fixture::new(&[4, 4, 4]).write_gz(&path);

    let volume = load_volume(&path, &LoadOptions::default()).unwrap();
    assert_eq!(volume.shape(), [4, 4, 4, 1]);
    assert_relative_eq!(volume.get(3, 2, 1, 0).unwrap(), 123.0);
}

#[test]
fn test_2d_image_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flat.nii");
    Fixture::new(&[4, 4]).write(&path);

    let err = load_volume(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::CoreError(sbv_core::Error::UnsupportedShape { .. })
    ));
}

#[test]
fn test_nifti2_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("two.nii");
    // NIfTI-2: 540-byte header with its magic right after sizeof_hdr
    let mut bytes = vec![0u8; 544];
    put_i32(&mut bytes, 0, 540);
    bytes[4..12].copy_from_slice(b"n+2\0\r\n\x1a\n");
    bytes.extend_from_slice(&[0u8; 64]);
    File::create(&path).unwrap().write_all(&bytes).unwrap();

    let err = load_volume(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Nifti(_)));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_volume(dir.path().join("nope.nii"), &LoadOptions::default());
    assert!(result.is_err());
}
