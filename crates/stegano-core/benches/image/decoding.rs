use criterion::{criterion_group, criterion_main, Criterion};
use stegano_core::{decode, encode, Algorithm, Carrier, EncodeOptions};

pub fn image_decoding(c: &mut Criterion) {
    let carrier = Carrier::from_fn(256, 256, 3, |x, y, c| {
        (40 + (x * 3 + y * 5 + u32::from(c) * 17) % 176) as u8
    })
    .expect("Carrier is not valid.");

    for algorithm in Algorithm::all() {
        let options = EncodeOptions {
            algorithm,
            ..EncodeOptions::default()
        };
        let secret = encode(&carrier, b"Hello World!", &options)
            .expect("Cannot hide secret message")
            .image;

        c.bench_function(&format!("Image Decoding {algorithm}"), |b| {
            b.iter(|| decode(&secret, "", &options.algorithm).expect("Failed to unveil message"))
        });
    }
}

criterion_group!(benches, image_decoding);
criterion_main!(benches);
