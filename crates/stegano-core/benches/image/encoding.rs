use criterion::{criterion_group, criterion_main, Criterion};
use stegano_core::{encode, Algorithm, Carrier, EncodeOptions};

pub fn image_encoding(c: &mut Criterion) {
    let carrier = Carrier::from_fn(256, 256, 3, |x, y, c| {
        (40 + (x * 3 + y * 5 + u32::from(c) * 17) % 176) as u8
    })
    .expect("Carrier is not valid.");
    let secret_message = b"Hello World!";

    for algorithm in Algorithm::all() {
        let options = EncodeOptions {
            algorithm,
            ..EncodeOptions::default()
        };
        c.bench_function(&format!("Image Encoding {algorithm}"), |b| {
            b.iter(|| {
                encode(&carrier, &secret_message[..], &options).expect("Cannot hide secret message")
            })
        });
    }
}

criterion_group!(benches, image_encoding);
criterion_main!(benches);
