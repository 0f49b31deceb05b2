//! Unit tests for the multiply/divide unit.

use mrisc_sim::core::control::MdOp;
use mrisc_sim::core::units::mdu::Mdu;

/// Tests the low word of a product.
#[test]
fn test_mdu_mul() {
    assert_eq!(Mdu::execute(MdOp::Mul, 6, 7), 42);
    assert_eq!(Mdu::execute(MdOp::Mul, 0xFFFF_FFFF, 2), 0xFFFF_FFFE);
    assert_eq!(Mdu::execute(MdOp::Mul, 0x1_0000, 0x1_0000), 0);
}

/// Tests the high word of signed and unsigned products.
#[test]
fn test_mdu_mulhi() {
    assert_eq!(Mdu::execute(MdOp::Mulhi, 0x1_0000, 0x1_0000), 1);
    // -1 * -1 = 1: high word is 0 signed, 0xfffffffe unsigned.
    assert_eq!(Mdu::execute(MdOp::Mulhi, 0xFFFF_FFFF, 0xFFFF_FFFF), 0);
    assert_eq!(Mdu::execute(MdOp::Mulhiu, 0xFFFF_FFFF, 0xFFFF_FFFF), 0xFFFF_FFFE);
    assert_eq!(Mdu::execute(MdOp::Mulhi, 0xFFFF_FFFF, 2), 0xFFFF_FFFF);
}

/// Tests ordinary signed and unsigned division.
#[test]
fn test_mdu_div() {
    assert_eq!(Mdu::execute(MdOp::Div, 20, 3), 6);
    assert_eq!(Mdu::execute(MdOp::Div, (-20i32) as u32, 3), (-6i32) as u32);
    assert_eq!(Mdu::execute(MdOp::Divu, 0xFFFF_FFFE, 2), 0x7FFF_FFFF);
    assert_eq!(Mdu::execute(MdOp::Rem, (-20i32) as u32, 3), (-2i32) as u32);
    assert_eq!(Mdu::execute(MdOp::Remu, 20, 3), 2);
}

/// Tests the fixed results for division by zero.
#[test]
fn test_mdu_div_by_zero() {
    assert_eq!(Mdu::execute(MdOp::Div, 123, 0), 0xFFFF_FFFF);
    assert_eq!(Mdu::execute(MdOp::Divu, 123, 0), 0xFFFF_FFFF);
    assert_eq!(Mdu::execute(MdOp::Rem, 123, 0), 123);
    assert_eq!(Mdu::execute(MdOp::Remu, 0x8000_0000, 0), 0x8000_0000);
}

/// Tests the fixed results for signed overflow.
#[test]
fn test_mdu_div_overflow() {
    let min = i32::MIN as u32;
    let minus_one = u32::MAX;
    assert_eq!(Mdu::execute(MdOp::Div, min, minus_one), min);
    assert_eq!(Mdu::execute(MdOp::Rem, min, minus_one), 0);
}
