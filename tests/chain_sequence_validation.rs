//! Chain and sequence walks: state threading, chronology, boundaries.

mod common;

use common::{at, node_covering, permissive_catalog, renewal_digest, StaticToken};
use ers_verifier::{
    ArchiveTimeStamp, ArchiveTimeStampChain, ArchiveTimeStampSequence, DigestValue,
    EvidenceRecord, HashAlgorithm, NodePath, PartialHashTree, ProtectedData, ProtectedDataObject,
    SubIndication, Verdict, VerifyWorkflow, VerificationPolicy,
};

const ALGO: HashAlgorithm = HashAlgorithm::Sha256;

fn protected_doc(data: &[u8]) -> (ProtectedData, DigestValue) {
    let digest = DigestValue::of(ALGO, data);
    let protected = ProtectedData::new(vec![
        ProtectedDataObject::new("doc-1", digest.clone()).with_content(data.to_vec()),
    ]);
    (protected, digest)
}

fn workflow() -> VerifyWorkflow {
    VerifyWorkflow::new(Box::new(permissive_catalog()))
        .with_policy(VerificationPolicy::default().with_current_time(at(2020, 6, 1)))
}

#[test]
fn two_time_stamp_chain_threads_the_previous_token_digest() {
    let (protected, digest) = protected_doc(b"archived payload");

    let t0 = node_covering(vec![digest], ALGO, at(2001, 3, 1));
    let t1 = node_covering(vec![renewal_digest(&t0, ALGO)], ALGO, at(2005, 3, 1));
    let record = EvidenceRecord::new(
        1,
        vec![ALGO],
        ArchiveTimeStampSequence::new(vec![ArchiveTimeStampChain::new(
            vec![t0, t1],
            b"chain-0".to_vec(),
        )]),
    );

    let report = workflow().run(&record, &protected);
    assert_eq!(report.overall(), Verdict::Valid, "report: {:?}", report.entries());
}

#[test]
fn renewing_time_stamp_covering_an_unrelated_digest_is_flagged() {
    let (protected, digest) = protected_doc(b"archived payload");

    let t0 = node_covering(vec![digest], ALGO, at(2001, 3, 1));
    let unrelated = DigestValue::of(ALGO, b"something else entirely");
    let t1 = node_covering(vec![unrelated], ALGO, at(2005, 3, 1));
    let record = EvidenceRecord::new(
        1,
        vec![ALGO],
        ArchiveTimeStampSequence::new(vec![ArchiveTimeStampChain::new(
            vec![t0, t1],
            b"chain-0".to_vec(),
        )]),
    );

    let report = workflow().run(&record, &protected);
    assert_eq!(report.overall(), Verdict::Invalid);

    let t1_path = NodePath::record().sequence().chain(0).time_stamp(1);
    let finding = report
        .for_path(&t1_path)
        .find(|e| e.verdict == Verdict::Invalid)
        .expect("the second time-stamp should carry the failure");
    assert_eq!(finding.sub_indication, Some(SubIndication::HashValueMismatch));
    assert!(finding.message.contains("previous TSP of chain"));
}

#[test]
fn algorithm_attribute_must_match_the_token_imprint_algorithm() {
    let data = b"mixed algorithms";
    let digest = DigestValue::of(HashAlgorithm::Sha512, data);
    let protected = ProtectedData::new(vec![ProtectedDataObject::new("doc-1", digest.clone())]);

    let token = StaticToken::new(at(2010, 1, 1), HashAlgorithm::Sha512, digest.clone());
    let node = ArchiveTimeStamp::new(Box::new(token))
        .with_digest_algorithm(HashAlgorithm::Sha256)
        .with_reduced_hash_tree(vec![PartialHashTree::new(vec![digest])]);

    let record = EvidenceRecord::new(
        1,
        vec![HashAlgorithm::Sha256, HashAlgorithm::Sha512],
        ArchiveTimeStampSequence::new(vec![ArchiveTimeStampChain::new(
            vec![node],
            b"chain-0".to_vec(),
        )]),
    );

    let report = workflow().run(&record, &protected);
    assert_eq!(report.overall(), Verdict::Invalid);
    let finding = report
        .entries()
        .iter()
        .find(|e| e.sub_indication == Some(SubIndication::InvalidFormat))
        .expect("format finding expected");
    assert!(finding.message.contains("does not match"));
}

#[test]
fn time_stamp_not_before_its_secure_date_is_invalid() {
    // A record claiming a time-stamp from the future of the verification run.
    let (protected, digest) = protected_doc(b"premature");
    let t0 = node_covering(vec![digest], ALGO, at(2030, 1, 1));
    let record = EvidenceRecord::new(
        1,
        vec![ALGO],
        ArchiveTimeStampSequence::new(vec![ArchiveTimeStampChain::new(
            vec![t0],
            b"chain-0".to_vec(),
        )]),
    );

    let report = workflow().run(&record, &protected);
    assert_eq!(report.overall(), Verdict::Invalid);
    assert!(report
        .entries()
        .iter()
        .any(|e| e.sub_indication == Some(SubIndication::OutOfBoundsNoPoe)));
}

#[test]
fn equal_signing_times_violate_strict_ordering() {
    let (protected, digest) = protected_doc(b"twins");
    let t0 = node_covering(vec![digest], ALGO, at(2005, 3, 1));
    let t1 = node_covering(vec![renewal_digest(&t0, ALGO)], ALGO, at(2005, 3, 1));
    let record = EvidenceRecord::new(
        1,
        vec![ALGO],
        ArchiveTimeStampSequence::new(vec![ArchiveTimeStampChain::new(
            vec![t0, t1],
            b"chain-0".to_vec(),
        )]),
    );

    let report = workflow().run(&record, &protected);
    assert_eq!(report.overall(), Verdict::Invalid);
    assert!(report
        .entries()
        .iter()
        .any(|e| e.sub_indication == Some(SubIndication::OutOfBoundsNoPoe)));
}

#[test]
fn empty_chain_is_invalid() {
    let (protected, _) = protected_doc(b"anything");
    let record = EvidenceRecord::new(
        1,
        vec![ALGO],
        ArchiveTimeStampSequence::new(vec![ArchiveTimeStampChain::new(vec![], b"empty".to_vec())]),
    );

    let report = workflow().run(&record, &protected);
    assert_eq!(report.overall(), Verdict::Invalid);
    let finding = &report.entries()[0];
    assert!(finding.message.contains("at least one time-stamp"));
    assert_eq!(finding.path, NodePath::record().sequence().chain(0));
}

#[test]
fn empty_sequence_is_vacuously_checked() {
    let (protected, _) = protected_doc(b"anything");
    let record = EvidenceRecord::new(1, vec![ALGO], ArchiveTimeStampSequence::default());

    let report = workflow().run(&record, &protected);
    assert_eq!(report.overall(), Verdict::Valid);
    assert!(report.proven_existence_time().is_none());
}

#[test]
fn rebuilding_the_same_record_is_structurally_identical() {
    let build = || {
        let digest = DigestValue::of(ALGO, b"stable payload");
        let t0 = node_covering(vec![digest], ALGO, at(2001, 3, 1));
        let t1 = node_covering(vec![renewal_digest(&t0, ALGO)], ALGO, at(2005, 3, 1));
        ArchiveTimeStampSequence::new(vec![ArchiveTimeStampChain::new(
            vec![t0, t1],
            b"chain-0".to_vec(),
        )])
    };

    assert!(build().structurally_equals(&build()));

    let tampered = {
        let digest = DigestValue::of(ALGO, b"stable payload");
        let t0 = node_covering(vec![digest.clone()], ALGO, at(2001, 3, 1));
        let t1 = node_covering(vec![digest], ALGO, at(2005, 3, 1));
        ArchiveTimeStampSequence::new(vec![ArchiveTimeStampChain::new(
            vec![t0, t1],
            b"chain-0".to_vec(),
        )])
    };
    assert!(!build().structurally_equals(&tampered));
}
