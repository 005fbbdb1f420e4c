use std::path::Path;

/// Read a float WAV back as interleaved samples plus its channel count.
pub fn read_test_wav(path: &Path) -> (Vec<f32>, u16) {
    let mut reader = hound::WavReader::open(path).expect("open wav");
    let channels = reader.spec().channels;
    let samples = reader
        .samples::<f32>()
        .map(|sample| sample.expect("read wav sample"))
        .collect();
    (samples, channels)
}
