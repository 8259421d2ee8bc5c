use proptest::prelude::*;
use umap_attacks::{
    Compressor, ImpersonationOracle, OracleConfig, PassiveAttack, ProtocolOracle, Variant,
};

fn oracle(variant: Variant, bits: u32, compressor: Compressor, seed: u64) -> ProtocolOracle {
    OracleConfig::new(variant, bits)
        .with_compressor(compressor)
        .with_seed(seed)
        .build()
        .expect("width is valid")
}

fn widths() -> impl Strategy<Value = u32> {
    prop::sample::select(vec![16u32, 32, 64, 96, 128])
}

fn compressors() -> impl Strategy<Value = Compressor> {
    prop::sample::select(vec![Compressor::XorFold, Compressor::NibbleParity])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn emap_identifier_recovered_within_200_rounds(
        bits in widths(),
        compressor in compressors(),
        seed in any::<u64>(),
    ) {
        let mut o = oracle(Variant::Emap, bits, compressor, seed);
        let result = PassiveAttack::new().with_max_rounds(200).run(&mut o);
        prop_assert!(result.success, "{}", result.details);
        prop_assert!(o.verify_identifier(result.identifier.unwrap()));
    }

    #[test]
    fn mmap_identifier_recovered_within_64_rounds(bits in widths(), seed in any::<u64>()) {
        let mut o = oracle(Variant::Mmap, bits, Compressor::default(), seed);
        let result = PassiveAttack::new().with_max_rounds(64).run(&mut o);
        prop_assert!(result.success, "{}", result.details);
        prop_assert!(o.verify_identifier(result.identifier.unwrap()));
    }

    #[test]
    fn impersonator_tracks_tag(
        emap in any::<bool>(),
        compressor in compressors(),
        seed in any::<u64>(),
        rounds in 1usize..40,
    ) {
        let variant = if emap { Variant::Emap } else { Variant::Mmap };
        let mut tag = oracle(variant, 96, compressor, seed);
        let mut imp = ImpersonationOracle::new(variant, 96, compressor, tag.snapshot()).unwrap();
        for _ in 0..rounds {
            let t = tag.run_once().unwrap();
            prop_assert_eq!(imp.impersonate(t.a, t.b, t.c), Some((t.d, t.e)));
        }
        prop_assert_eq!(imp.state(), &tag.snapshot());
    }

    #[test]
    fn flipped_b_bit_never_mutates(
        emap in any::<bool>(),
        seed in any::<u64>(),
        flip in 0u32..96,
    ) {
        let variant = if emap { Variant::Emap } else { Variant::Mmap };
        let mut tag = oracle(variant, 96, Compressor::default(), seed);
        let before = tag.snapshot();
        prop_assert!(tag.run_once_with_interference(|c| c.b ^= 1 << flip).is_none());
        prop_assert_eq!(tag.snapshot(), before);
    }
}

#[test]
fn rounds_needed_grow_slowly_with_width() {
    // sanity check on the scaling the harness plots: both attacks finish
    // well inside their budgets at every width
    for bits in [32, 64, 96, 128] {
        for variant in [Variant::Mmap, Variant::Emap] {
            let mut o = oracle(variant, bits, Compressor::default(), u64::from(bits));
            let result = PassiveAttack::new().with_max_rounds(200).run(&mut o);
            assert!(result.success, "{} k={}: {}", variant, bits, result.details);
            assert!(result.rounds_used < 100, "{} k={} took {}", variant, bits, result.rounds_used);
        }
    }
}
