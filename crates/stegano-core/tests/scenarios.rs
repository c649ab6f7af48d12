mod common;

use common::{gradient_carrier, noise_carrier};
use stegano_core::media::Persist;
use stegano_core::{
    decode, decode_text, encode, load_carrier, Algorithm, CipherSuite, Dct, EmbeddingAlgorithm,
    EncodeOptions, QualityScore, SteganoError,
};
use tempfile::TempDir;

#[test]
fn should_hide_hello_without_a_password() {
    let carrier = gradient_carrier(300, 300, 3);

    let outcome = encode(&carrier, b"HELLO", &EncodeOptions::default()).unwrap();

    assert!(outcome.quality.psnr > 40.0, "PSNR {}", outcome.quality.psnr);
    assert_eq!(outcome.quality.quality_score, QualityScore::Excellent);
    assert_eq!(
        decode_text(&outcome.image, "", &Algorithm::default()).unwrap(),
        "HELLO"
    );
}

#[test]
fn should_hide_hello_with_aes_and_a_password() {
    let carrier = gradient_carrier(300, 300, 3);
    let options = EncodeOptions {
        password: "secret123".into(),
        cipher: CipherSuite::Aes256Cbc,
        ..EncodeOptions::default()
    };

    let outcome = encode(&carrier, b"HELLO", &options).unwrap();

    assert_eq!(
        decode_text(&outcome.image, "secret123", &Algorithm::default()).unwrap(),
        "HELLO"
    );
    for wrong in ["", "secret", "Secret123"] {
        assert!(matches!(
            decode(&outcome.image, wrong, &Algorithm::default()),
            Err(SteganoError::DecryptionFailed)
        ));
    }
}

#[test]
fn dct_capacity_on_a_small_grey_image() {
    let carrier = noise_carrier(64, 64, 1, 9);
    let dct: Algorithm = Dct::default().into();

    assert_eq!(dct.capacity(&carrier), 64);
    assert!(matches!(
        dct.embed(&carrier, &[7; 65]),
        Err(SteganoError::CapacityExceeded {
            required: 65,
            available: 64
        })
    ));
    let stego = dct.embed(&carrier, &[7; 64]).unwrap();
    assert_eq!(dct.extract(&stego, None).unwrap(), vec![7; 64]);
}

#[test]
fn should_survive_a_trip_through_a_png_file() {
    let out_dir = TempDir::new().unwrap();
    let secret_path = out_dir.path().join("secret.png");

    for algorithm in Algorithm::all() {
        let options = EncodeOptions {
            password: "Secret42".into(),
            algorithm,
            cipher: CipherSuite::ChaCha20,
            ..EncodeOptions::default()
        };
        let carrier = noise_carrier(128, 128, 4, 13);
        let mut outcome = encode(&carrier, b"Hello World!", &options).unwrap();
        outcome.image.save_as(&secret_path).unwrap();

        let reloaded = load_carrier(&secret_path).unwrap();

        assert_eq!(reloaded, outcome.image);
        assert_eq!(
            decode_text(&reloaded, "Secret42", &algorithm).unwrap(),
            "Hello World!",
            "{algorithm}"
        );
    }
}

#[test]
fn unreadable_files_fail_to_load() {
    let out_dir = TempDir::new().unwrap();
    let not_an_image = out_dir.path().join("notes.png");
    std::fs::write(&not_an_image, b"this is not a png").unwrap();

    assert!(matches!(
        load_carrier(&not_an_image),
        Err(SteganoError::ImageLoad(_))
    ));
    assert!(matches!(
        load_carrier(out_dir.path().join("missing.png")),
        Err(SteganoError::ImageLoad(_))
    ));
}

#[test]
fn decoding_with_another_algorithm_does_not_return_the_message() {
    let carrier = noise_carrier(128, 128, 3, 21);
    let options = EncodeOptions {
        algorithm: "DWT".parse().unwrap(),
        ..EncodeOptions::default()
    };
    let outcome = encode(&carrier, b"only for DWT", &options).unwrap();

    assert!(decode(&outcome.image, "", &"LSB".parse().unwrap())
        .map_or(true, |message| message != b"only for DWT"));
}
