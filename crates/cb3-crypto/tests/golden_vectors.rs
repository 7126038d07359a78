//! Known-answer tests pinning the byte-exact output of each construction.
//!
//! Any change to context strings, length encodings, field order or the SIV
//! key schedule breaks these.

use cb3_crypto::{
    chacha20_blake3, xchacha20_blake3, xchacha20_blake3_siv, AeadError, LengthRequirement,
    Parameter, SivKeySchedule, TAG_SIZE,
};

const TEST_PAYLOAD: &str = "af2ca24c2283a85b9e52614abf1c6e89a13aa547c316954ffe7f06c11096ae1cc3e782f8";

const MESSAGE: &[u8] = b"Ladies and Gentlemen of the class of '99";
const AD: &[u8] = b"cb3 golden vector";

fn sequential_bytes<const N: usize>(start: u8) -> [u8; N] {
    let mut out = [0u8; N];
    for (i, b) in out.iter_mut().enumerate() {
        *b = start.wrapping_add(i as u8);
    }
    out
}

#[test]
fn chacha20_blake3_zero_key_test_message() {
    let payload = chacha20_blake3::encrypt(b"test", &[0u8; 8], &[0u8; 32], None).unwrap();

    assert_eq!(payload.len(), 4 + TAG_SIZE);
    assert_eq!(hex::encode(&payload), TEST_PAYLOAD);
    assert_eq!(
        chacha20_blake3::decrypt(&payload, &[0u8; 8], &[0u8; 32], None).unwrap(),
        b"test"
    );
}

#[test]
fn chacha20_blake3_every_byte_mutation_fails() {
    let payload = hex::decode(TEST_PAYLOAD).unwrap();

    for i in 0..payload.len() {
        for delta in [0x01u8, 0x80, 0xFF] {
            let mut mutated = payload.clone();
            mutated[i] ^= delta;
            assert_eq!(
                chacha20_blake3::decrypt(&mutated, &[0u8; 8], &[0u8; 32], None),
                Err(AeadError::AuthenticationFailed),
                "mutation at byte {i} (xor {delta:#04x}) must fail"
            );
        }
    }
}

#[test]
fn chacha20_blake3_tag_length_payload_is_invalid_parameter() {
    let payload = hex::decode(TEST_PAYLOAD).unwrap();
    let tag_only = &payload[payload.len() - TAG_SIZE..];

    assert_eq!(
        chacha20_blake3::decrypt(tag_only, &[0u8; 8], &[0u8; 32], None),
        Err(AeadError::InvalidParameter {
            parameter: Parameter::Ciphertext,
            expected: LengthRequirement::AtLeast(TAG_SIZE + 1),
            actual: TAG_SIZE,
        })
    );
}

#[test]
fn xchacha20_blake3_known_answer() {
    let key: [u8; 32] = sequential_bytes(0x00);
    let nonce: [u8; 24] = sequential_bytes(0x40);

    let payload = xchacha20_blake3::encrypt(MESSAGE, &nonce, &key, Some(AD)).unwrap();
    assert_eq!(
        hex::encode(&payload),
        "a5dcb12ef9c8c3ea46f52cdece6aee5f1bd0be8fae949140540693948e5f5bef\
         7ff5d824a9f33adbacd4d76d6768c5af32aeded1bf8fdd02fb6cf99cec112309\
         7eb90c8e049ab257"
    );
    assert_eq!(
        xchacha20_blake3::decrypt(&payload, &nonce, &key, Some(AD)).unwrap(),
        MESSAGE
    );
}

#[test]
fn xchacha20_blake3_siv_derived_known_answer() {
    let key: [u8; 64] = sequential_bytes(0x00);

    let payload = xchacha20_blake3_siv::encrypt(MESSAGE, &key, Some(AD)).unwrap();
    assert_eq!(
        hex::encode(&payload),
        "3aad56ef161da5be70d7946b291d60a85e5508c23857c45b7b83eb7dfda7bff3\
         dc17d253ef568556eb417a837e8f00989c87ce2572596951e82e1455a28c0312\
         543ecf48a6c33319"
    );
    assert_eq!(
        xchacha20_blake3_siv::decrypt(&payload, &key, Some(AD)).unwrap(),
        MESSAGE
    );
}

#[test]
fn xchacha20_blake3_siv_split_known_answer() {
    let key: [u8; 64] = sequential_bytes(0x00);

    let payload =
        xchacha20_blake3_siv::encrypt_with_schedule(MESSAGE, &key, Some(AD), SivKeySchedule::Split)
            .unwrap();
    assert_eq!(
        hex::encode(&payload),
        "6ba0a54de1427904f2474203f18937abba0edf60da099dcd286c84cf6e4f39c0\
         217c2f1c7c0b6dc26d4ecd4e4d3ca76b3c35042c5fb85d3bc392c33d96ee004e\
         2f7ffd678beb250d"
    );
}
