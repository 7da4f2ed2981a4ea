//! Montgomery arithmetic properties, checked against `num_bigint`.

#[allow(dead_code)]
mod common;

use common::to_biguint;
use num_bigint::BigUint;
use num_traits::One;
use proptest::prelude::*;
use rsa_timing::{Error, Montgomery, U128, U64};

prop_compose! {
    /// A random odd modulus of at least two bits.
    fn odd_modulus()(words in any::<[u64; 2]>()) -> U128 {
        let mut acc = U128::from_u64(words[0]);
        acc = acc.shl_vartime(64).bitor(&U128::from_u64(words[1]));
        acc.bitor(&U128::from_u64(3))
    }
}

prop_compose! {
    fn residue_pair()(n in odd_modulus(), a in any::<[u64; 2]>(), b in any::<[u64; 2]>())
        -> (U128, U128, U128) {
        let mut x = U128::from_u64(a[0]).shl_vartime(64).bitor(&U128::from_u64(a[1]));
        let mut y = U128::from_u64(b[0]).shl_vartime(64).bitor(&U128::from_u64(b[1]));
        x = x.div_rem(&n).unwrap().1;
        y = y.div_rem(&n).unwrap().1;
        (n, x, y)
    }
}

proptest! {
    /// MP(a, b) == a * b * r^-1 (mod n), and the result is reduced.
    #[test]
    fn product_congruence((n, a, b) in residue_pair()) {
        let monty = Montgomery::new(&n).unwrap();

        let a_bar = monty.to_montgomery(&a);
        let b_bar = monty.to_montgomery(&b);
        let product = monty.product(&a_bar, &b_bar);

        prop_assert!(product < n);

        let expected = (to_biguint(&a) * to_biguint(&b)) % to_biguint(&n);
        let got = monty.from_montgomery(&product);
        prop_assert_eq!(to_biguint(&got), expected);

        // the two finales agree on the value
        let (vartime, _) = monty.product_vartime(&a_bar, &b_bar);
        prop_assert_eq!(vartime, product);
    }

    /// The conversion pair is the identity on [0, n).
    #[test]
    fn montgomery_round_trip((n, a, _) in residue_pair()) {
        let monty = Montgomery::new(&n).unwrap();
        prop_assert_eq!(monty.from_montgomery(&monty.to_montgomery(&a)), a);
    }

    /// r * r^-1 - n * n' == 1 over the integers.
    #[test]
    fn inverse_relation(n in odd_modulus()) {
        let k = U128::BITS;
        let (r_inv, n_prime) = Montgomery::mont_inverse(&n, k);

        let r = BigUint::one() << k as usize;
        let lhs = r * to_biguint(&r_inv);
        let rhs = to_biguint(&n) * to_biguint(&n_prime) + BigUint::one();
        prop_assert_eq!(lhs, rhs);
        prop_assert!(r_inv < n);
    }

    /// The same relation at a tight (not limb-aligned) radix.
    #[test]
    fn inverse_relation_tight(seed in any::<u64>()) {
        let n = U128::from_u64(seed | 1 | (1 << 63));
        let k = 64;
        let (r_inv, n_prime) = Montgomery::mont_inverse(&n, k);

        let r = BigUint::one() << k as usize;
        let lhs = r * to_biguint(&r_inv);
        let rhs = to_biguint(&n) * to_biguint(&n_prime) + BigUint::one();
        prop_assert_eq!(lhs, rhs);
    }
}

#[test]
fn small_modulus_with_tight_radix() {
    // n = 9991, r = 2^16: r^-1 = 4109 and n' = 26953 satisfy
    // r * r^-1 - n * n' == 1
    let n = U64::from_u64(9991);
    let monty = Montgomery::with_r_exp(&n, 16).unwrap();
    assert_eq!(*monty.n_prime(), U64::from_u64(26953));
    assert_eq!(monty.one(), U64::from_u64(5590));

    let (r_inv, n_prime) = Montgomery::mont_inverse(&n, 16);
    assert_eq!(r_inv, U64::from_u64(4109));
    assert_eq!(n_prime, U64::from_u64(26953));

    let a = monty.to_montgomery(&U64::from_u64(100));
    let b = monty.to_montgomery(&U64::from_u64(200));
    let (product, extra_reduction) = monty.product_vartime(&a, &b);
    assert_eq!(product, U64::from_u64(710));
    assert!(extra_reduction);
    assert_eq!(monty.from_montgomery(&product), U64::from_u64(18));
}

#[test]
fn modulus_parity() {
    assert_eq!(
        Montgomery::new(&U64::from_u64(8)).unwrap_err(),
        Error::InvalidModulus
    );
    assert_eq!(
        Montgomery::new(&U64::ZERO).unwrap_err(),
        Error::InvalidModulus
    );
    assert!(Montgomery::new(&U64::from_u64(9)).is_ok());
}

#[test]
fn conversion_against_reference() {
    let n = U64::from_u64(12905932563964705511);
    let monty = Montgomery::new(&n).unwrap();

    for value in [1u64, 2, 9991, 1 << 40, 12905932563964705510] {
        let bar = monty.to_montgomery(&U64::from_u64(value));
        let expected =
            (BigUint::from(value) << 64usize) % to_biguint::<{ U64::LIMBS }>(&n);
        assert_eq!(to_biguint(&bar), expected);
    }
}
