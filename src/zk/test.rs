use crate::accumulator::Accumulator;
use crate::pedersen::{Pedersen, PedersenCommitment};
use crate::poly::vanishing_polynomial;
use crate::setup::CommitmentKey;
use crate::test_utils::{random_elements, tampered_copies, test_key, TestCurve, TestCurveFr};
use crate::zk::{
    E2eMemProof, E2eNonMemProof, Transcript, ZkDegCheck, ZkMem, ZkMemProof, ZkNonMem,
    ZkNonMemProof, ZkProof,
};
use crate::Error;
use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup, Group};
use ark_ff::One;
use ark_poly::univariate::DensePolynomial;
use ark_std::test_rng;
use ark_std::vec::Vec;

type E = TestCurve;
type G1Affine = <E as Pairing>::G1Affine;
type G2Affine = <E as Pairing>::G2Affine;
type GT = ark_ec::pairing::PairingOutput<E>;

const TRANSCRIPT: Transcript = [7u8; 32];

struct MemInstance {
    key: CommitmentKey<E>,
    digest: G1Affine,
    c_i: PedersenCommitment<E>,
    poly: DensePolynomial<TestCurveFr>,
    pi_i: G1Affine,
}

/// `I` (6 elements) inside `X u I` (26 elements), under a key with `q = 32`.
fn mem_instance() -> MemInstance {
    let mut rng = test_rng();
    let (key, _) = test_key(5);
    let set_x = random_elements(20, &mut rng);
    let set_i = random_elements(6, &mut rng);
    let all: Vec<_> = set_x.iter().chain(set_i.iter()).copied().collect();
    let (digest, _) = Accumulator::commit(&key, &all).unwrap();
    let proofs = Accumulator::mem_prove(&key, &set_x, &set_i).unwrap();
    let (pi_i, _) = Accumulator::agg_mem_prove(&key, &set_i, &proofs).unwrap();
    let (c_i, poly) = Pedersen::commit_set(&key, &set_i, &mut rng).unwrap();
    MemInstance {
        key,
        digest,
        c_i,
        poly,
        pi_i,
    }
}

#[test]
fn degree_check_completeness() {
    let mut rng = test_rng();
    let (key, _) = test_key(4);
    for n in [1usize, 5, 16] {
        let elements = random_elements(n, &mut rng);
        let (c_i, poly) = Pedersen::commit_set(&key, &elements, &mut rng).unwrap();
        let proof = ZkDegCheck::prove(&key, &c_i, &poly, &TRANSCRIPT).unwrap();
        assert_eq!(proof.degree, n as u64);
        assert!(ZkDegCheck::verify(&key, &proof, &c_i.com, &TRANSCRIPT));

        let from_elements =
            ZkDegCheck::prove_elements(&key, &c_i, &elements, &TRANSCRIPT).unwrap();
        assert_eq!(from_elements, proof);
    }
}

#[test]
fn degree_check_rejects_wrong_claims() {
    let mut rng = test_rng();
    let (key, _) = test_key(4);
    let elements = random_elements(6, &mut rng);
    let (c_i, poly) = Pedersen::commit_set(&key, &elements, &mut rng).unwrap();
    let proof = ZkDegCheck::prove(&key, &c_i, &poly, &TRANSCRIPT).unwrap();

    for degree in [0u64, 5, 7, 17, u64::MAX] {
        let mut forged = proof.clone();
        forged.degree = degree;
        assert!(!ZkDegCheck::verify(&key, &forged, &c_i.com, &TRANSCRIPT));
    }
    assert!(!ZkDegCheck::verify(&key, &proof, &c_i.com, &[8u8; 32]));

    // a shorter polynomial does not match the commitment
    let shorter = vanishing_polynomial(&elements[..5]);
    let proof = ZkDegCheck::prove(&key, &c_i, &shorter, &TRANSCRIPT).unwrap();
    assert!(!ZkDegCheck::verify(&key, &proof, &c_i.com, &TRANSCRIPT));

    let mut tweaks: Vec<fn(&mut crate::zk::ZkDegCheckProof<E>)> = Vec::new();
    tweaks.push(|p| p.c_f = (p.c_f + G2Affine::generator()).into_affine());
    tweaks.push(|p| p.c = (p.c + G2Affine::generator()).into_affine());
    tweaks.push(|p| p.c_alpha = (p.c_alpha + G2Affine::generator()).into_affine());
    let proof = ZkDegCheck::prove(&key, &c_i, &poly, &TRANSCRIPT).unwrap();
    for tweak in tweaks {
        let mut forged = proof.clone();
        tweak(&mut forged);
        assert!(!ZkDegCheck::verify(&key, &forged, &c_i.com, &TRANSCRIPT));
    }
}

#[test]
fn degree_check_preconditions() {
    let mut rng = test_rng();
    let (key, _) = test_key(3);
    let elements = random_elements(4, &mut rng);
    let (c_i, poly) = Pedersen::commit_set(&key, &elements, &mut rng).unwrap();

    let constant = DensePolynomial {
        coeffs: vec![TestCurveFr::one()],
    };
    assert!(matches!(
        ZkDegCheck::prove(&key, &c_i, &constant, &TRANSCRIPT),
        Err(Error::InvalidArgument(_))
    ));
    let not_monic = crate::poly::scale(&poly, TestCurveFr::from(3u64));
    assert!(matches!(
        ZkDegCheck::prove(&key, &c_i, &not_monic, &TRANSCRIPT),
        Err(Error::InvalidArgument(_))
    ));
    let too_many = random_elements(9, &mut rng);
    assert!(matches!(
        ZkDegCheck::prove_elements(&key, &c_i, &too_many, &TRANSCRIPT),
        Err(Error::CapacityExceeded {
            requested: 9,
            capacity: 8
        })
    ));
}

#[test]
fn zk_mem_completeness() {
    let mut rng = test_rng();
    let inst = mem_instance();
    let proof = ZkMem::prove(&inst.key, &inst.c_i, &inst.pi_i, &TRANSCRIPT, &mut rng).unwrap();
    assert!(ZkMem::verify(
        &inst.key,
        &proof,
        &inst.c_i.com,
        &inst.digest,
        &TRANSCRIPT
    ));
    assert!(!ZkMem::verify(
        &inst.key,
        &proof,
        &inst.c_i.com,
        &inst.digest,
        &[0u8; 32]
    ));

    // fresh blinding every time
    let again = ZkMem::prove(&inst.key, &inst.c_i, &inst.pi_i, &TRANSCRIPT, &mut rng).unwrap();
    assert_ne!(again.pi_2, proof.pi_2);
    assert!(ZkMem::verify(
        &inst.key,
        &again,
        &inst.c_i.com,
        &inst.digest,
        &TRANSCRIPT
    ));
}

#[test]
fn zk_mem_rejects_other_statements() {
    let mut rng = test_rng();
    let inst = mem_instance();
    let proof = ZkMem::prove(&inst.key, &inst.c_i, &inst.pi_i, &TRANSCRIPT, &mut rng).unwrap();

    let other_digest = (inst.digest + inst.key.g()).into_affine();
    assert!(!ZkMem::verify(
        &inst.key,
        &proof,
        &inst.c_i.com,
        &other_digest,
        &TRANSCRIPT
    ));
    let outside = random_elements(6, &mut rng);
    let (other_c, _) = Pedersen::commit_set(&inst.key, &outside, &mut rng).unwrap();
    assert!(!ZkMem::verify(
        &inst.key,
        &proof,
        &other_c.com,
        &inst.digest,
        &TRANSCRIPT
    ));

    // a commitment to a set outside the digest has no valid witness to start from
    let forged = ZkMem::prove(&inst.key, &other_c, &inst.pi_i, &TRANSCRIPT, &mut rng).unwrap();
    assert!(!ZkMem::verify(
        &inst.key,
        &forged,
        &other_c.com,
        &inst.digest,
        &TRANSCRIPT
    ));
}

#[test]
fn zk_mem_rejects_perturbed_proofs() {
    let mut rng = test_rng();
    let inst = mem_instance();
    let proof = ZkMem::prove(&inst.key, &inst.c_i, &inst.pi_i, &TRANSCRIPT, &mut rng).unwrap();

    let tweaks: [fn(&mut ZkMemProof<E>); 10] = [
        |p| p.pi_1 = (p.pi_1 + G1Affine::generator()).into_affine(),
        |p| p.pi_2 = (p.pi_2 + G1Affine::generator()).into_affine(),
        |p| p.r_1 = (p.r_1 + G1Affine::generator()).into_affine(),
        |p| p.r_2 = (p.r_2 + G1Affine::generator()).into_affine(),
        |p| p.r_3 += GT::generator(),
        |p| p.s_r += TestCurveFr::one(),
        |p| p.s_tau1 += TestCurveFr::one(),
        |p| p.s_tau2 += TestCurveFr::one(),
        |p| p.s_delta1 += TestCurveFr::one(),
        |p| p.s_delta2 += TestCurveFr::one(),
    ];
    for tweak in tweaks {
        let mut forged = proof.clone();
        tweak(&mut forged);
        assert!(!ZkMem::verify(
            &inst.key,
            &forged,
            &inst.c_i.com,
            &inst.digest,
            &TRANSCRIPT
        ));
    }
}

struct NonMemInstance {
    key: CommitmentKey<E>,
    digest: G1Affine,
    c_i: PedersenCommitment<E>,
    poly: DensePolynomial<TestCurveFr>,
    pair: crate::accumulator::AggNonMemProof<E>,
}

fn non_mem_instance() -> NonMemInstance {
    let mut rng = test_rng();
    let (key, _) = test_key(5);
    let set_x = random_elements(24, &mut rng);
    let set_i = random_elements(7, &mut rng);
    let (digest, _) = Accumulator::commit(&key, &set_x).unwrap();
    let witnesses = Accumulator::non_mem_prove(&key, &set_x, &set_i).unwrap();
    let pair = Accumulator::agg_non_mem_prove(&key, &set_i, &witnesses).unwrap();
    let (c_i, poly) = Pedersen::commit_set(&key, &set_i, &mut rng).unwrap();
    NonMemInstance {
        key,
        digest,
        c_i,
        poly,
        pair,
    }
}

#[test]
fn zk_non_mem_completeness() {
    let mut rng = test_rng();
    let inst = non_mem_instance();
    let proof = ZkNonMem::prove(
        &inst.key,
        &inst.digest,
        &inst.c_i,
        &inst.pair,
        &TRANSCRIPT,
        &mut rng,
    )
    .unwrap();
    assert!(ZkNonMem::verify(
        &inst.key,
        &proof,
        &inst.digest,
        &inst.c_i.com,
        &TRANSCRIPT
    ));
    assert!(!ZkNonMem::verify(
        &inst.key,
        &proof,
        &inst.digest,
        &inst.c_i.com,
        &[1u8; 32]
    ));
    let other_digest = (inst.digest + inst.key.g()).into_affine();
    assert!(!ZkNonMem::verify(
        &inst.key,
        &proof,
        &other_digest,
        &inst.c_i.com,
        &TRANSCRIPT
    ));
}

#[test]
fn zk_non_mem_accepts_batch_pair() {
    let mut rng = test_rng();
    let (key, _) = test_key(4);
    let set_x = random_elements(10, &mut rng);
    let set_i = random_elements(5, &mut rng);
    let (digest, _) = Accumulator::commit(&key, &set_x).unwrap();
    let pair = Accumulator::batch_non_mem_prove(&key, &set_x, &set_i).unwrap();
    let (c_i, _) = Pedersen::commit_set(&key, &set_i, &mut rng).unwrap();
    let proof = ZkNonMem::prove(&key, &digest, &c_i, &pair, &TRANSCRIPT, &mut rng).unwrap();
    assert!(ZkNonMem::verify(&key, &proof, &digest, &c_i.com, &TRANSCRIPT));
}

#[test]
fn zk_non_mem_rejects_perturbed_proofs() {
    let mut rng = test_rng();
    let inst = non_mem_instance();
    let proof = ZkNonMem::prove(
        &inst.key,
        &inst.digest,
        &inst.c_i,
        &inst.pair,
        &TRANSCRIPT,
        &mut rng,
    )
    .unwrap();

    let tweaks: [fn(&mut ZkNonMemProof<E>); 15] = [
        |p| p.a_bar0 = (p.a_bar0 + G2Affine::generator()).into_affine(),
        |p| p.a_bar1 = (p.a_bar1 + G2Affine::generator()).into_affine(),
        |p| p.b_bar0 = (p.b_bar0 + G1Affine::generator()).into_affine(),
        |p| p.b_bar1 = (p.b_bar1 + G1Affine::generator()).into_affine(),
        |p| p.r_1 = (p.r_1 + G2Affine::generator()).into_affine(),
        |p| p.r_2_0 = (p.r_2_0 + G1Affine::generator()).into_affine(),
        |p| p.r_2_1 = (p.r_2_1 + G1Affine::generator()).into_affine(),
        |p| p.r_3 += GT::generator(),
        |p| p.s_r += TestCurveFr::one(),
        |p| p.s_tau0 += TestCurveFr::one(),
        |p| p.s_tau1 += TestCurveFr::one(),
        |p| p.s_tau2 += TestCurveFr::one(),
        |p| p.s_tau3 += TestCurveFr::one(),
        |p| p.s_delta3 += TestCurveFr::one(),
        |p| p.s_delta4 += TestCurveFr::one(),
    ];
    for tweak in tweaks {
        let mut forged = proof.clone();
        tweak(&mut forged);
        assert!(!ZkNonMem::verify(
            &inst.key,
            &forged,
            &inst.digest,
            &inst.c_i.com,
            &TRANSCRIPT
        ));
    }
}

#[test]
fn e2e_membership() {
    let mut rng = test_rng();
    let inst = mem_instance();
    let proof = E2eMemProof::prove(
        &inst.key,
        &inst.c_i,
        &inst.poly,
        &inst.pi_i,
        &TRANSCRIPT,
        &mut rng,
    )
    .unwrap();
    assert!(proof.verify(&inst.key, &inst.c_i.com, &inst.digest, &TRANSCRIPT));
    assert!(!proof.verify(&inst.key, &inst.c_i.com, &inst.digest, &[3u8; 32]));

    // the degree check is bound to this membership proof
    let other = E2eMemProof::prove(
        &inst.key,
        &inst.c_i,
        &inst.poly,
        &inst.pi_i,
        &TRANSCRIPT,
        &mut rng,
    )
    .unwrap();
    let spliced = E2eMemProof {
        mem: proof.mem.clone(),
        degree: other.degree,
    };
    assert!(!spliced.verify(&inst.key, &inst.c_i.com, &inst.digest, &TRANSCRIPT));
}

#[test]
fn e2e_non_membership() {
    let mut rng = test_rng();
    let inst = non_mem_instance();
    let proof = E2eNonMemProof::prove(
        &inst.key,
        &inst.digest,
        &inst.c_i,
        &inst.poly,
        &inst.pair,
        &TRANSCRIPT,
        &mut rng,
    )
    .unwrap();
    assert!(proof.verify(&inst.key, &inst.digest, &inst.c_i.com, &TRANSCRIPT));
    assert!(!proof.verify(&inst.key, &inst.digest, &inst.c_i.com, &[4u8; 32]));

    let mut forged = proof.clone();
    forged.degree.degree += 1;
    assert!(!forged.verify(&inst.key, &inst.digest, &inst.c_i.com, &TRANSCRIPT));
}

#[test]
fn proof_hashes_and_sizes() {
    let mut rng = test_rng();
    let inst = mem_instance();
    let mem = ZkMem::prove(&inst.key, &inst.c_i, &inst.pi_i, &TRANSCRIPT, &mut rng).unwrap();
    let degree = ZkDegCheck::prove(&inst.key, &inst.c_i, &inst.poly, &TRANSCRIPT).unwrap();

    let h1 = mem.hash_proof(&TRANSCRIPT).unwrap();
    assert_eq!(h1, mem.hash_proof(&TRANSCRIPT).unwrap());
    assert_ne!(h1, mem.hash_proof(&[0u8; 32]).unwrap());
    let mut other = mem.clone();
    other.s_r += TestCurveFr::one();
    assert_ne!(h1, other.hash_proof(&TRANSCRIPT).unwrap());

    // BLS12-381: G1 48, G2 96, GT 576, scalar 32 bytes
    assert_eq!(degree.byte_size(), 8 + 3 * 96);
    assert_eq!(mem.byte_size(), 4 * 48 + 576 + 5 * 32);

    let inst = non_mem_instance();
    let non_mem = ZkNonMem::prove(
        &inst.key,
        &inst.digest,
        &inst.c_i,
        &inst.pair,
        &TRANSCRIPT,
        &mut rng,
    )
    .unwrap();
    assert_eq!(non_mem.byte_size(), 3 * 96 + 4 * 48 + 576 + 7 * 32);
}

#[test]
fn tampered_proof_bytes_never_verify() {
    let mut rng = test_rng();
    let inst = mem_instance();
    let mem = ZkMem::prove(&inst.key, &inst.c_i, &inst.pi_i, &TRANSCRIPT, &mut rng).unwrap();
    let copies = tampered_copies(&mem, 13);
    assert!(!copies.is_empty());
    for p in copies {
        assert!(!ZkMem::verify(&inst.key, &p, &inst.c_i.com, &inst.digest, &TRANSCRIPT));
    }
    let e2e = E2eMemProof::prove(
        &inst.key,
        &inst.c_i,
        &inst.poly,
        &inst.pi_i,
        &TRANSCRIPT,
        &mut rng,
    )
    .unwrap();
    for p in tampered_copies(&e2e, 17) {
        assert!(!p.verify(&inst.key, &inst.c_i.com, &inst.digest, &TRANSCRIPT));
    }

    let inst = non_mem_instance();
    let non_mem = ZkNonMem::prove(
        &inst.key,
        &inst.digest,
        &inst.c_i,
        &inst.pair,
        &TRANSCRIPT,
        &mut rng,
    )
    .unwrap();
    let copies = tampered_copies(&non_mem, 19);
    assert!(!copies.is_empty());
    for p in copies {
        assert!(!ZkNonMem::verify(&inst.key, &p, &inst.digest, &inst.c_i.com, &TRANSCRIPT));
    }
    let e2e = E2eNonMemProof::prove(
        &inst.key,
        &inst.digest,
        &inst.c_i,
        &inst.poly,
        &inst.pair,
        &TRANSCRIPT,
        &mut rng,
    )
    .unwrap();
    for p in tampered_copies(&e2e, 23) {
        assert!(!p.verify(&inst.key, &inst.digest, &inst.c_i.com, &TRANSCRIPT));
    }
}
