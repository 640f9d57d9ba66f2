#[cfg(test)]
mod stream_tests {
    use cube_cipher_core::cfb::{CipherVariant, CubeCipher, Direction, EngineConfig, StreamCipher};
    use cube_cipher_core::constants::{CHECKPOINT_V1, MAGIC_CCK1};
    use cube_cipher_core::recovery::{CheckpointError, Checkpointable, SessionCheckpoint};
    use cube_cipher_core::types::CipherError;
    use cube_cipher_core::utils::enum_name_or_hex;

    const SEED: &str = "chat key";
    const CHUNKS: [&str; 3] = ["Hello Bob", " how are you", "Fine thanks"];

    #[test]
    fn test_chunked_chat_round_trip() {
        let mut alice = StreamCipher::encryptor(SEED, 'S');
        let mut bob = StreamCipher::decryptor(SEED, 'S');

        for chunk in CHUNKS {
            let c = alice.process_chunk(chunk).unwrap();
            assert_eq!(bob.process_chunk(&c).unwrap(), chunk);
            assert_eq!(alice.driving(), bob.driving());
        }
        assert_eq!(alice.chunks(), 3);
        let total: usize = CHUNKS.iter().map(|c| c.len()).sum();
        assert_eq!(alice.steps(), total as u64);
        assert_eq!(bob.steps(), total as u64);
    }

    #[test]
    fn test_register_carries_across_chunks() {
        let mut stream = StreamCipher::encryptor(SEED, 'S');
        let first = stream.process_chunk("abc").unwrap();
        assert_eq!(stream.driving(), first.chars().last());

        // Empty chunk leaves the register alone.
        assert_eq!(stream.process_chunk("").unwrap(), "");
        assert_eq!(stream.driving(), first.chars().last());
    }

    // Without round constants a chunked stream is the same as one session.
    #[test]
    fn test_classic_chunks_match_single_session() {
        let config = EngineConfig::default().with_variant(CipherVariant::Classic);
        let mut stream = StreamCipher::with_config(SEED, Direction::Encrypt, Some('S'), config.clone()).unwrap();
        let chunked: String = CHUNKS.iter().map(|c| stream.process_chunk(c).unwrap()).collect();

        let mut whole = CubeCipher::with_config(SEED, config).unwrap();
        assert_eq!(whole.encrypt_sequence(&CHUNKS.concat(), 'S').unwrap().text, chunked);
    }

    #[test]
    fn test_round_constants_restart_each_chunk() {
        let mut stream = StreamCipher::encryptor(SEED, 'S');
        let chunked: String = CHUNKS.iter().map(|c| stream.process_chunk(c).unwrap()).collect();

        let mut whole = CubeCipher::new(SEED);
        assert_ne!(whole.encrypt_sequence(&CHUNKS.concat(), 'S').unwrap().text, chunked);
    }

    #[test]
    fn test_checkpoint_resume_continues_stream() {
        let mut original = StreamCipher::encryptor(SEED, 'S');
        original.process_chunk(CHUNKS[0]).unwrap();

        let bytes = original.checkpoint().encode().unwrap();
        assert_eq!(&bytes[..4], &MAGIC_CCK1);
        assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), CHECKPOINT_V1);

        let checkpoint = SessionCheckpoint::decode(&bytes).unwrap();
        assert_eq!(checkpoint, original.checkpoint());

        let mut resumed = StreamCipher::resume(SEED, EngineConfig::default(), &checkpoint).unwrap();
        assert_eq!(resumed.direction(), Direction::Encrypt);
        assert_eq!(resumed.chunks(), 1);
        for chunk in &CHUNKS[1..] {
            assert_eq!(resumed.process_chunk(chunk).unwrap(), original.process_chunk(chunk).unwrap());
        }
        assert_eq!(resumed.steps(), original.steps());
    }

    #[test]
    fn test_resume_with_wrong_seed_rejected() {
        let mut stream = StreamCipher::encryptor(SEED, 'S');
        stream.process_chunk("abc").unwrap();
        let checkpoint = stream.checkpoint();

        match StreamCipher::resume("other key", EngineConfig::default(), &checkpoint) {
            Err(CipherError::Checkpoint(CheckpointError::KeyMismatch { found, .. })) => {
                assert_eq!(found, hex::encode(checkpoint.key_id));
            }
            other => panic!("expected a key mismatch, got {:?}", other.map(|s| s.chunks())),
        }
    }

    #[test]
    fn test_resume_with_wrong_variant_rejected() {
        let checkpoint = StreamCipher::encryptor(SEED, 'S').checkpoint();
        let classic = EngineConfig::default().with_variant(CipherVariant::Classic);
        assert!(matches!(
            StreamCipher::resume(SEED, classic, &checkpoint),
            Err(CipherError::Checkpoint(CheckpointError::VariantMismatch { .. }))
        ));
    }

    #[test]
    fn test_resume_rejects_corrupt_placements() {
        let mut checkpoint = StreamCipher::decryptor(SEED, 'S').checkpoint();
        checkpoint.placements.pop();
        assert!(matches!(
            StreamCipher::resume(SEED, EngineConfig::default(), &checkpoint),
            Err(CipherError::Checkpoint(CheckpointError::InvalidCube(_)))
        ));
    }

    #[test]
    fn test_decode_rejects_bad_prefix() {
        assert_eq!(SessionCheckpoint::decode(b"CC"), Err(CheckpointError::Truncated { len: 2 }));
        assert_eq!(SessionCheckpoint::decode(b"XXXX\x01\x00"), Err(CheckpointError::BadMagic));
        assert_eq!(
            SessionCheckpoint::decode(b"CCK1\x07\x00"),
            Err(CheckpointError::UnsupportedVersion { found: 7 })
        );
        assert!(matches!(SessionCheckpoint::decode(b"CCK1\x01\x00"), Err(CheckpointError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_oversized_placement_count() {
        let mut checkpoint = StreamCipher::encryptor(SEED, 'S').checkpoint();
        checkpoint.placements.clear();
        let mut bytes = checkpoint.encode().unwrap();
        // Placements come last: a zero-length varint is the final byte.
        assert_eq!(bytes.pop(), Some(0));
        bytes.push(253);
        bytes.extend_from_slice(&u64::MAX.to_le_bytes());

        assert!(matches!(SessionCheckpoint::decode(&bytes), Err(CheckpointError::Decode(_))));
    }

    #[test]
    fn test_resume_rejects_out_of_range_orientation() {
        let mut checkpoint = StreamCipher::encryptor(SEED, 'S').checkpoint();
        checkpoint.placements[0].orientation = [[100, 0, 0], [0, 100, 0], [0, 0, 1]];
        assert!(matches!(
            StreamCipher::resume(SEED, EngineConfig::default(), &checkpoint),
            Err(CipherError::Checkpoint(CheckpointError::InvalidCube(_)))
        ));
    }

    #[test]
    fn test_resume_keeps_move_count() {
        let mut original = StreamCipher::encryptor(SEED, 'S');
        original.process_chunk(CHUNKS[0]).unwrap();
        let checkpoint = original.checkpoint();
        assert_eq!(checkpoint.moves_applied, CHUNKS[0].len() as u64);

        let mut resumed = StreamCipher::resume(SEED, EngineConfig::default(), &checkpoint).unwrap();
        assert_eq!(resumed.cipher().cube().moves_applied(), original.cipher().cube().moves_applied());

        resumed.process_chunk(CHUNKS[1]).unwrap();
        original.process_chunk(CHUNKS[1]).unwrap();
        assert_eq!(resumed.cipher().cube().moves_applied(), resumed.steps());
        assert_eq!(resumed.cipher().cube().moves_applied(), original.cipher().cube().moves_applied());
    }

    #[test]
    fn test_checkpoint_summary_names_variant() {
        let mut checkpoint = StreamCipher::encryptor(SEED, 'S').checkpoint();
        assert!(checkpoint.summary().contains("RoundConstants"));
        assert_eq!(checkpoint.export().unwrap(), checkpoint.encode().unwrap());

        checkpoint.variant = 0x7f;
        assert!(checkpoint.summary().contains("0x7f"));
        assert_eq!(enum_name_or_hex::<CipherVariant>(1), "Classic");
    }
}
