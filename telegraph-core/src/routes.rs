use ethers_core::types::{Address, H160, U256};

/// The telegraph message relay on the home chain (zkSync Era).
pub const MESSAGE_RELAY: Address = H160([
    0xeb, 0x76, 0x2c, 0x28, 0x9c, 0x1a, 0x3b, 0xdf, 0x23, 0x75, 0x67, 0x9c, 0x1c, 0x69, 0xb7,
    0x45, 0xf9, 0xcd, 0xc1, 0x7f,
]);

/// The cross-chain NFT contract on the home chain.
pub const NFT_CROSS_CHAIN: Address = H160([
    0xd4, 0x3a, 0x18, 0x3c, 0x97, 0xdb, 0x91, 0x74, 0x96, 0x26, 0x07, 0xa8, 0xb6, 0x55, 0x2c,
    0xe3, 0x20, 0xea, 0xc5, 0xaa,
]);

/// Native value attached to every telegraph send (0.0007 units).
pub const SEND_MESSAGE_VALUE: u64 = 700_000_000_000_000;

/// Native value attached to every mint (0.0005 units).
pub const MINT_VALUE: u64 = 500_000_000_000_000;

/// LayerZero-style chain ids for the networks the fleet talks to. These
/// are endpoint ids, not EVM chain ids.
pub mod chain_id {
    /// Arbitrum One
    pub const ARBITRUM: u16 = 110;
    /// Optimism
    pub const OPTIMISM: u16 = 111;
    /// Polygon PoS
    pub const POLYGON: u16 = 109;
    /// BNB Smart Chain
    pub const BSC: u16 = 102;
    /// Avalanche C-Chain
    pub const AVALANCHE: u16 = 106;
}

/// One bridge-eligible destination: where the trusted remote NFT contract
/// lives and what the cross-chain send costs in native value.
#[derive(Debug, Clone, Copy)]
pub struct BridgeRoute {
    /// LayerZero-style destination chain id.
    pub chain_id: u16,
    /// The NFT contract deployed on the destination chain.
    pub remote: Address,
    /// Native fee the cross-chain call must carry.
    pub fee: u64,
}

/// Destinations an NFT may be bridged to, keyed by chain id. Read-only
/// for the process lifetime.
pub const BRIDGE_ROUTES: &[BridgeRoute] = &[
    BridgeRoute {
        chain_id: chain_id::ARBITRUM,
        remote: H160([
            0x80, 0x44, 0x2b, 0x39, 0xe0, 0xa8, 0xbf, 0xb8, 0x1a, 0x55, 0x1d, 0xf1, 0xa6, 0x55,
            0xdb, 0x26, 0xfa, 0x0e, 0x2b, 0xe2,
        ]),
        fee: 400_000_000_000_000,
    },
    BridgeRoute {
        chain_id: chain_id::OPTIMISM,
        remote: H160([
            0x64, 0xe0, 0xf6, 0x16, 0x4a, 0xc1, 0x10, 0xb6, 0x7d, 0xf9, 0xa4, 0x84, 0x87, 0x07,
            0xff, 0xa0, 0x7c, 0xb1, 0x4d, 0x34,
        ]),
        fee: 350_000_000_000_000,
    },
    BridgeRoute {
        chain_id: chain_id::POLYGON,
        remote: H160([
            0x52, 0x3d, 0x5f, 0x14, 0x37, 0x0d, 0x3e, 0xb9, 0xdb, 0x25, 0x2f, 0x54, 0x1c, 0x2e,
            0x21, 0x20, 0x69, 0x0f, 0x1d, 0x6d,
        ]),
        fee: 300_000_000_000_000,
    },
    BridgeRoute {
        chain_id: chain_id::BSC,
        remote: H160([
            0xa6, 0x9c, 0x4c, 0xd1, 0x1b, 0x9f, 0x67, 0x7d, 0x18, 0xac, 0x91, 0x8c, 0x94, 0x4f,
            0xa9, 0x36, 0xf5, 0x3f, 0x2a, 0x77,
        ]),
        fee: 250_000_000_000_000,
    },
];

impl BridgeRoute {
    /// The route's fee as a `U256` value field.
    pub fn fee_value(&self) -> U256 {
        U256::from(self.fee)
    }
}
