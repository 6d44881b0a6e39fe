use ethers_core::abi::{encode, Token};
use ethers_core::types::{Address, Bytes, U256};
use ethers_core::utils::id;

/// 4-byte selector of the NFT contract's `mint()`. The whole payload:
/// no arguments follow.
pub const MINT_SELECTOR: [u8; 4] = [0x12, 0x49, 0xc5, 0x8b];

/// Width of one ABI word.
const WORD: usize = 32;

/// Zero padding in front of an `address` inside its ABI word.
const ADDRESS_PAD: usize = WORD - 20;

fn call(signature: &str, args: &[Token]) -> Bytes {
    let mut data = id(signature).to_vec();
    data.extend(encode(args));
    data.into()
}

/// Calldata for `sendMessage(string,uint16)` on the message relay.
pub fn encode_send_message(message: &str, dest_chain_id: u16) -> Bytes {
    call(
        "sendMessage(string,uint16)",
        &[
            Token::String(message.to_string()),
            Token::Uint(U256::from(dest_chain_id)),
        ],
    )
}

/// The fixed calldata for `mint()` on the NFT contract.
pub fn encode_mint() -> Bytes {
    MINT_SELECTOR.to_vec().into()
}

/// Calldata for `crossChain(uint16,bytes,uint256)` on the NFT contract.
/// `destination` is the packed trusted remote from
/// [`pack_trusted_remote`].
pub fn encode_cross_chain(dest_chain_id: u16, destination: &[u8], token_id: U256) -> Bytes {
    call(
        "crossChain(uint16,bytes,uint256)",
        &[
            Token::Uint(U256::from(dest_chain_id)),
            Token::Bytes(destination.to_vec()),
            Token::Uint(token_id),
        ],
    )
}

/// Packs the trusted-remote byte string the cross-chain call expects:
/// the remote and local contract addresses ABI-encoded as two 32-byte
/// words, with the 24 zero padding bytes stripped so exactly
/// `remote ++ local` (40 bytes) remains. The stripping width is tied to
/// the ABI word size; the contract wants the packed form, not the
/// word-aligned one.
pub fn pack_trusted_remote(remote: Address, local: Address) -> Vec<u8> {
    let words = encode(&[Token::Address(remote), Token::Address(local)]);
    let mut packed = Vec::with_capacity(2 * (WORD - ADDRESS_PAD));
    packed.extend_from_slice(&words[ADDRESS_PAD..WORD]);
    packed.extend_from_slice(&words[WORD + ADDRESS_PAD..]);
    packed
}

#[cfg(test)]
mod test {
    use super::*;
    use ethers_core::abi::ParamType;

    #[test]
    fn mint_selector_matches_signature_hash() {
        assert_eq!(MINT_SELECTOR, id("mint()"));
        assert_eq!(encode_mint().to_vec(), MINT_SELECTOR.to_vec());
    }

    #[test]
    fn send_message_roundtrips_through_abi() {
        let data = encode_send_message("gm", 110);
        assert_eq!(&data[..4], &id("sendMessage(string,uint16)")[..]);
        let tokens = ethers_core::abi::decode(
            &[ParamType::String, ParamType::Uint(16)],
            &data[4..],
        )
        .unwrap();
        assert_eq!(tokens[0], Token::String("gm".to_string()));
        assert_eq!(tokens[1], Token::Uint(U256::from(110u32)));
    }

    #[test]
    fn cross_chain_roundtrips_through_abi() {
        let destination = vec![0xaa; 40];
        let data = encode_cross_chain(106, &destination, U256::from(77_213u64));
        assert_eq!(&data[..4], &id("crossChain(uint16,bytes,uint256)")[..]);
        let tokens = ethers_core::abi::decode(
            &[
                ParamType::Uint(16),
                ParamType::Bytes,
                ParamType::Uint(256),
            ],
            &data[4..],
        )
        .unwrap();
        assert_eq!(tokens[1], Token::Bytes(destination));
        assert_eq!(tokens[2], Token::Uint(U256::from(77_213u64)));
    }

    #[test]
    fn trusted_remote_is_the_two_addresses_back_to_back() {
        let remote = Address::from_low_u64_be(0x1111);
        let local = Address::from_low_u64_be(0x2222);
        let packed = pack_trusted_remote(remote, local);
        assert_eq!(packed.len(), 40);
        assert_eq!(&packed[..20], remote.as_bytes());
        assert_eq!(&packed[20..], local.as_bytes());
    }

    #[test]
    fn trusted_remote_strips_exactly_the_padding() {
        // Addresses whose bytes are all nonzero, so any leftover padding
        // would show up as zeros in the packed form.
        let remote = Address::from_slice(&[0x11; 20]);
        let local = Address::from_slice(&[0x22; 20]);
        let packed = pack_trusted_remote(remote, local);
        assert!(packed.iter().all(|b| *b != 0));
    }
}
