//! Integration tests for traps and access types.

use mrisc_sim::common::error::RESERVED_EXIT_BASE;
use mrisc_sim::common::{AccessType, Trap};

/// Tests that every trap has a distinct reserved exit code.
#[test]
fn test_trap_exit_codes() {
    let traps = [
        Trap::IllegalInstruction(0),
        Trap::InstructionAddressMisaligned(2),
        Trap::InstructionAccessFault(0x1000),
        Trap::LoadAccessFault(0x1000),
        Trap::StoreAccessFault(0x1000),
        Trap::UnknownSimRoutine(99),
        Trap::Aborted,
    ];
    for (i, trap) in traps.iter().enumerate() {
        assert_eq!(trap.exit_code(), RESERVED_EXIT_BASE + 1 + i as u32);
        assert!(Trap::is_reserved_exit_code(trap.exit_code()));
    }
}

/// Tests the boundaries of the reserved exit-code range.
#[test]
fn test_reserved_exit_code_range() {
    assert!(!Trap::is_reserved_exit_code(0));
    assert!(!Trap::is_reserved_exit_code(RESERVED_EXIT_BASE));
    assert!(!Trap::is_reserved_exit_code(RESERVED_EXIT_BASE + 8));
    assert!(!Trap::is_reserved_exit_code(u32::MAX));
}

/// Tests the access fault selected for each access type.
#[test]
fn test_access_fault_by_type() {
    assert_eq!(
        Trap::access_fault(AccessType::Fetch, 4),
        Trap::InstructionAccessFault(4)
    );
    assert_eq!(
        Trap::access_fault(AccessType::Read, 8),
        Trap::LoadAccessFault(8)
    );
    assert_eq!(
        Trap::access_fault(AccessType::Write, 12),
        Trap::StoreAccessFault(12)
    );
}

/// Tests access type classification.
#[test]
fn test_access_type_is_write() {
    assert!(AccessType::Write.is_write());
    assert!(!AccessType::Read.is_write());
    assert!(!AccessType::Fetch.is_write());
}

/// Tests trap messages.
#[test]
fn test_trap_display() {
    assert_eq!(
        Trap::IllegalInstruction(0xDEAD_BEEF).to_string(),
        "illegal instruction 0xdeadbeef"
    );
    assert_eq!(Trap::UnknownSimRoutine(42).to_string(), "unknown simulator routine 42");
}
