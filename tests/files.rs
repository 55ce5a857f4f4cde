use std::{
    fs,
    path::{Path, PathBuf},
};

use huffman::{CodeTree, Error};
use rand_chacha::{
    rand_core::{RngCore, SeedableRng},
    ChaCha8Rng,
};
use test_case::test_case;

/// A scratch directory unique to one test, removed on drop.
struct Scratch(PathBuf);

impl Scratch {
    fn new(name: &str) -> anyhow::Result<Self> {
        let dir = std::env::temp_dir().join(format!("huffman-{}-{name}", std::process::id()));
        fs::create_dir_all(&dir)?;
        Ok(Self(dir))
    }

    fn path(&self, file: &str) -> PathBuf {
        self.0.join(file)
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn text_corpus() -> Vec<u8> {
    b"When in the Course of human events, it becomes necessary for one people \
      to dissolve the political bands which have connected them with another.\n"
        .repeat(200)
}

fn random_bytes() -> Vec<u8> {
    let mut payload = vec![0; 50_000];
    ChaCha8Rng::seed_from_u64(7).fill_bytes(&mut payload);
    payload
}

fn round_trip_bare(dir: &Scratch, input: &[u8]) -> anyhow::Result<(Vec<u8>, u64)> {
    let (original, compressed, restored) = (dir.path("in"), dir.path("in.huf"), dir.path("out"));
    fs::write(&original, input)?;

    let tree = huffman::compress_file(&original, &compressed)?;
    let written = huffman::decompress_file(&compressed, &restored, &tree)?;

    assert_eq!(fs::read(&compressed)?, huffman::compress(input)?.frame);
    Ok((fs::read(&restored)?, written))
}

#[test_case("empty", b"".to_vec())]
#[test_case("single", b"z".to_vec())]
#[test_case("repeated", b"zzzz".to_vec())]
#[test_case("text", text_corpus())]
#[test_case("random", random_bytes())]
fn bare_frame_files(name: &str, input: Vec<u8>) -> anyhow::Result<()> {
    let dir = Scratch::new(&format!("bare-{name}"))?;
    let (restored, written) = round_trip_bare(&dir, &input)?;
    assert_eq!(restored, input);
    assert_eq!(written, input.len() as u64);
    Ok(())
}

#[test]
fn empty_file_compresses_to_two_bytes() -> anyhow::Result<()> {
    let dir = Scratch::new("empty-size")?;
    fs::write(dir.path("in"), b"")?;
    let tree = huffman::compress_file(dir.path("in"), dir.path("in.huf"))?;
    assert!(tree.is_empty());
    assert_eq!(fs::read(dir.path("in.huf"))?, [0, 0]);
    Ok(())
}

#[test]
fn text_actually_shrinks() -> anyhow::Result<()> {
    let input = text_corpus();
    let compressed = huffman::compress(&input)?;
    assert!(compressed.frame.len() < input.len() * 3 / 4);
    Ok(())
}

#[test_case("text", text_corpus())]
#[test_case("random", random_bytes())]
#[test_case("empty", vec![])]
fn container_files(name: &str, input: Vec<u8>) -> anyhow::Result<()> {
    let dir = Scratch::new(&format!("container-{name}"))?;
    fs::write(dir.path("in"), &input)?;

    huffman::pack_file(dir.path("in"), dir.path("in.hf"))?;
    let written = huffman::unpack_file(dir.path("in.hf"), dir.path("out"))?;

    assert_eq!(written, input.len() as u64);
    assert_eq!(fs::read(dir.path("out"))?, input);
    Ok(())
}

#[test]
fn wrong_tree_is_rejected() -> anyhow::Result<()> {
    // A one-symbol tree has no right child, so the first `1` bit in the
    // frame has nowhere to go.
    let frame = huffman::compress(&text_corpus())?.frame;
    let other = CodeTree::from_bytes(b"zzzz")?;
    let err = huffman::decompress(&frame, &other).unwrap_err();
    assert!(matches!(err, Error::Format { .. }), "{err}");
    Ok(())
}

#[test]
fn missing_input_is_an_io_error() {
    let missing = Path::new("/definitely/not/here.txt");
    let err = huffman::compress_file(missing, std::env::temp_dir().join("unused.huf")).unwrap_err();
    assert!(matches!(err, Error::Io(_)), "{err}");
}
