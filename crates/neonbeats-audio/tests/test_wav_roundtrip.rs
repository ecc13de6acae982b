//! WAV encoder integration tests against the `hound` reference decoder.

use neonbeats_audio::{encode, GenerationRequest, Generator, Genre, MockSynth, SampleBuffer};

fn decode_with_hound(bytes: &[u8]) -> (hound::WavSpec, Vec<i16>) {
    let reader = hound::WavReader::new(std::io::Cursor::new(bytes)).expect("valid wav");
    let spec = reader.spec();
    let samples = reader
        .into_samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .expect("readable samples");
    (spec, samples)
}

#[test]
fn test_hound_reads_encoded_header() {
    let buffer = SampleBuffer::new(vec![vec![0.0; 10]; 2], 48000).unwrap();
    let (spec, samples) = decode_with_hound(encode(&buffer).as_bytes());

    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 48000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);
    assert_eq!(samples.len(), 20);
}

#[test]
fn test_hound_round_trip_quantization_error() {
    // Negative samples scale by 32768 and land within one step. A positive x encodes
    // as v = trunc(x * 32767), so x - v/32768 < (1 + x)/32768 <= 2/32768.
    let left: Vec<f32> = (0..200).map(|i| ((i as f32) * 0.05).sin() * 0.9).collect();
    let right: Vec<f32> = (0..200).map(|i| ((i as f32) * 0.11).cos() * 1.3).collect();
    let buffer = SampleBuffer::new(vec![left.clone(), right.clone()], 22050).unwrap();

    let (_, samples) = decode_with_hound(encode(&buffer).as_bytes());

    for (frame, pair) in samples.chunks_exact(2).enumerate() {
        for (value, original) in pair.iter().zip([left[frame], right[frame]]) {
            let clamped = original.clamp(-1.0, 1.0);
            let decoded = *value as f32 / 32768.0;
            assert!(
                (decoded - clamped).abs() < 2.0 / 32768.0,
                "frame {}: {} vs {}",
                frame,
                decoded,
                clamped
            );
        }
    }
}

#[test]
fn test_hound_reads_empty_clip() {
    let buffer = SampleBuffer::mono(vec![], 8000).unwrap();
    let wav = encode(&buffer);
    assert_eq!(wav.len(), 44);
    let (spec, samples) = decode_with_hound(wav.as_bytes());
    assert_eq!(spec.channels, 1);
    assert!(samples.is_empty());
}

#[test]
fn test_generated_clip_encodes_and_decodes() {
    let request = GenerationRequest {
        sample_rate: 11025,
        ..GenerationRequest::new(Genre::Rock, 2)
    };
    let buffer = MockSynth::new().generate(&request).unwrap();
    let wav = encode(&buffer);

    assert_eq!(wav.len(), 44 + 11025 * 2 * 2 * 2);
    let (spec, samples) = decode_with_hound(wav.as_bytes());
    assert_eq!(spec.sample_rate, 11025);
    assert_eq!(samples.len(), 11025 * 2 * 2);
    assert!(samples.iter().any(|&s| s != 0));
}
