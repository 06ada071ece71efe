//! Determinism verification for settlement output.
//!
//! The same snapshot must always produce the same instruction sequence. The
//! `payment_root` is a hash over the ordered instructions that lets two runs
//! be compared without diffing full payloads.

use sha2::{Digest, Sha256};
use tabsplit_types::PaymentInstruction;

/// Compute the payment root over an ordered instruction sequence.
///
/// Depends on payer, payee and exact amount of every instruction, in order.
#[must_use]
pub fn compute_payment_root(instructions: &[PaymentInstruction]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"tabsplit:payment_root:v1:");
    hasher.update((instructions.len() as u64).to_le_bytes());

    for instruction in instructions {
        // Length-prefix names so ("AB", "C") and ("A", "BC") differ.
        for name in [instruction.payer.as_str(), instruction.payee.as_str()] {
            hasher.update((name.len() as u64).to_le_bytes());
            hasher.update(name.as_bytes());
        }
        hasher.update(instruction.amount.normalize().to_string().as_bytes());
        hasher.update(b";");
    }

    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}

/// Recompute the root from `instructions` and compare with `expected_root`.
#[must_use]
pub fn verify_payment_root(instructions: &[PaymentInstruction], expected_root: &[u8; 32]) -> bool {
    compute_payment_root(instructions) == *expected_root
}
