//! Script opcodes for the Dogecoin script language.
//!
//! A closed table over byte values 0x00-0xff: every byte maps either to a
//! mnemonic or to the `OP_INVALIDOPCODE` sentinel, never a guess.

// Pushdata and constants
/// Pushes empty array (0/false) onto the stack.
pub const OP_0: u8 = 0x00;
/// Next byte is push length (up to 255 bytes).
pub const OP_PUSHDATA1: u8 = 0x4c;
/// Next two bytes are push length (up to 65535 bytes).
pub const OP_PUSHDATA2: u8 = 0x4d;
/// Next four bytes are push length.
pub const OP_PUSHDATA4: u8 = 0x4e;
/// Pushes -1 onto the stack.
pub const OP_1NEGATE: u8 = 0x4f;
/// Pushes 1 (true) onto the stack.
pub const OP_1: u8 = 0x51;
/// Pushes 2 onto the stack. Constants up to 16 follow consecutively.
pub const OP_2: u8 = 0x52;
/// Pushes 3 onto the stack.
pub const OP_3: u8 = 0x53;
/// Pushes 16 onto the stack.
pub const OP_16: u8 = 0x60;

// Flow control
/// Does nothing.
pub const OP_NOP: u8 = 0x61;
/// If top stack is true, execute block.
pub const OP_IF: u8 = 0x63;
/// If top stack is false, execute block.
pub const OP_NOTIF: u8 = 0x64;
/// Inverts preceding IF/NOTIF execution.
pub const OP_ELSE: u8 = 0x67;
/// Ends IF/ELSE block.
pub const OP_ENDIF: u8 = 0x68;
/// Fails if top stack false.
pub const OP_VERIFY: u8 = 0x69;
/// Ends execution, marks output unspendable.
pub const OP_RETURN: u8 = 0x6a;

// Stack
/// Drops top item.
pub const OP_DROP: u8 = 0x75;
/// Duplicates top.
pub const OP_DUP: u8 = 0x76;
/// Swaps top two.
pub const OP_SWAP: u8 = 0x7c;

// Comparison
/// Equals top two (bytes).
pub const OP_EQUAL: u8 = 0x87;
/// Equals + VERIFY.
pub const OP_EQUALVERIFY: u8 = 0x88;

// Arithmetic
/// Adds top two.
pub const OP_ADD: u8 = 0x93;
/// Subtracts top from second.
pub const OP_SUB: u8 = 0x94;

// Cryptography
/// RIPEMD160(SHA256(top)).
pub const OP_HASH160: u8 = 0xa9;
/// SHA256(SHA256(top)).
pub const OP_HASH256: u8 = 0xaa;
/// Verifies sig for pubkey/tx.
pub const OP_CHECKSIG: u8 = 0xac;
/// m-of-n multisig verify.
pub const OP_CHECKMULTISIG: u8 = 0xae;

// Locktime
/// Fails if locktime > tx.lock_time (BIP-65).
pub const OP_CHECKLOCKTIMEVERIFY: u8 = 0xb1;
/// Fails if sequence < tx.sequence (BIP-112, relative).
pub const OP_CHECKSEQUENCEVERIFY: u8 = 0xb2;

/// Sentinel for bytes with no assigned mnemonic.
pub const OP_INVALIDOPCODE: u8 = 0xff;

/// Sentinel mnemonic for unknown bytes.
pub const INVALID_OPCODE_NAME: &str = "OP_INVALIDOPCODE";

/// Returns the mnemonic for an opcode byte, or `"OP_INVALIDOPCODE"` when the
/// byte has no assigned mnemonic (including the 0x01-0x4b raw push range,
/// which carries a length rather than an operation).
#[must_use]
pub fn name(op_code: u8) -> &'static str {
    match op_code {
        0x00 => "OP_0",
        0x4c => "OP_PUSHDATA1",
        0x4d => "OP_PUSHDATA2",
        0x4e => "OP_PUSHDATA4",
        0x4f => "OP_1NEGATE",
        0x50 => "OP_RESERVED",
        0x51 => "OP_1",
        0x52 => "OP_2",
        0x53 => "OP_3",
        0x54 => "OP_4",
        0x55 => "OP_5",
        0x56 => "OP_6",
        0x57 => "OP_7",
        0x58 => "OP_8",
        0x59 => "OP_9",
        0x5a => "OP_10",
        0x5b => "OP_11",
        0x5c => "OP_12",
        0x5d => "OP_13",
        0x5e => "OP_14",
        0x5f => "OP_15",
        0x60 => "OP_16",
        0x61 => "OP_NOP",
        0x62 => "OP_VER",
        0x63 => "OP_IF",
        0x64 => "OP_NOTIF",
        0x65 => "OP_VERIF",
        0x66 => "OP_VERNOTIF",
        0x67 => "OP_ELSE",
        0x68 => "OP_ENDIF",
        0x69 => "OP_VERIFY",
        0x6a => "OP_RETURN",
        0x6b => "OP_TOALTSTACK",
        0x6c => "OP_FROMALTSTACK",
        0x6d => "OP_2DROP",
        0x6e => "OP_2DUP",
        0x6f => "OP_3DUP",
        0x70 => "OP_2OVER",
        0x71 => "OP_2ROT",
        0x72 => "OP_2SWAP",
        0x73 => "OP_IFDUP",
        0x74 => "OP_DEPTH",
        0x75 => "OP_DROP",
        0x76 => "OP_DUP",
        0x77 => "OP_NIP",
        0x78 => "OP_OVER",
        0x79 => "OP_PICK",
        0x7a => "OP_ROLL",
        0x7b => "OP_ROT",
        0x7c => "OP_SWAP",
        0x7d => "OP_TUCK",
        0x7e => "OP_CAT",
        0x7f => "OP_SUBSTR",
        0x80 => "OP_LEFT",
        0x81 => "OP_RIGHT",
        0x82 => "OP_SIZE",
        0x83 => "OP_INVERT",
        0x84 => "OP_AND",
        0x85 => "OP_OR",
        0x86 => "OP_XOR",
        0x87 => "OP_EQUAL",
        0x88 => "OP_EQUALVERIFY",
        0x89 => "OP_RESERVED1",
        0x8a => "OP_RESERVED2",
        0x8b => "OP_1ADD",
        0x8c => "OP_1SUB",
        0x8d => "OP_2MUL",
        0x8e => "OP_2DIV",
        0x8f => "OP_NEGATE",
        0x90 => "OP_ABS",
        0x91 => "OP_NOT",
        0x92 => "OP_0NOTEQUAL",
        0x93 => "OP_ADD",
        0x94 => "OP_SUB",
        0x95 => "OP_MUL",
        0x96 => "OP_DIV",
        0x97 => "OP_MOD",
        0x98 => "OP_LSHIFT",
        0x99 => "OP_RSHIFT",
        0x9a => "OP_BOOLAND",
        0x9b => "OP_BOOLOR",
        0x9c => "OP_NUMEQUAL",
        0x9d => "OP_NUMEQUALVERIFY",
        0x9e => "OP_NUMNOTEQUAL",
        0x9f => "OP_LESSTHAN",
        0xa0 => "OP_GREATERTHAN",
        0xa1 => "OP_LESSTHANOREQUAL",
        0xa2 => "OP_GREATERTHANOREQUAL",
        0xa3 => "OP_MIN",
        0xa4 => "OP_MAX",
        0xa5 => "OP_WITHIN",
        0xa6 => "OP_RIPEMD160",
        0xa7 => "OP_SHA1",
        0xa8 => "OP_SHA256",
        0xa9 => "OP_HASH160",
        0xaa => "OP_HASH256",
        0xab => "OP_CODESEPARATOR",
        0xac => "OP_CHECKSIG",
        0xad => "OP_CHECKSIGVERIFY",
        0xae => "OP_CHECKMULTISIG",
        0xaf => "OP_CHECKMULTISIGVERIFY",
        0xb0 => "OP_NOP1",
        0xb1 => "OP_CHECKLOCKTIMEVERIFY",
        0xb2 => "OP_CHECKSEQUENCEVERIFY",
        0xb3 => "OP_NOP4",
        0xb4 => "OP_NOP5",
        0xb5 => "OP_NOP6",
        0xb6 => "OP_NOP7",
        0xb7 => "OP_NOP8",
        0xb8 => "OP_NOP9",
        0xb9 => "OP_NOP10",
        0xfd => "OP_PUBKEYHASH",
        0xfe => "OP_PUBKEY",
        _ => INVALID_OPCODE_NAME,
    }
}

/// Resolves a mnemonic to its opcode byte. `None` for unknown names.
#[must_use]
pub fn from_name(mnemonic: &str) -> Option<u8> {
    // Closed table; the push range 0x01-0x4b has no mnemonics.
    for op_code in 0x00..=0xffu8 {
        if name(op_code) != INVALID_OPCODE_NAME && name(op_code) == mnemonic {
            return Some(op_code);
        }
    }
    None
}
