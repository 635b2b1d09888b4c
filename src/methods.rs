//! The fixed catalog of node RPC methods and the dispatch table mapping
//! caller-facing names onto it.
//!
//! The catalog is read-only for the lifetime of the process; changing the
//! lists is a compatibility-relevant interface change. Each method is
//! exposed under its literal wire name and under an idiomatic snake_case
//! alias (`eth_getBalance` / `eth_get_balance`); the alias normalization
//! lives here, at the dispatch boundary, never in the request builder.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Block tag appended to state-query calls that omit an explicit block
/// reference.
pub const DEFAULT_BLOCK_TAG: &str = "latest";

/// One entry of the method catalog.
#[derive(Debug)]
pub struct MethodDescriptor {
    /// The literal method string sent on the wire.
    pub wire: &'static str,
    /// Positional index at which an omitted trailing block tag is injected.
    /// Set only for the two state-query methods that accept one; widening
    /// this allowlist silently changes observable request shape.
    pub block_tag_at: Option<usize>,
}

const fn method(wire: &'static str) -> MethodDescriptor {
    MethodDescriptor { wire, block_tag_at: None }
}

const fn method_at_block(wire: &'static str, block_tag_at: usize) -> MethodDescriptor {
    MethodDescriptor { wire, block_tag_at: Some(block_tag_at) }
}

/// The standard JSON-RPC methods.
/// <https://github.com/ethereum/wiki/wiki/JSON-RPC>
pub const STANDARD: &[MethodDescriptor] = &[
    method("web3_clientVersion"),
    method("web3_sha3"),
    method("net_version"),
    method("net_peerCount"),
    method("net_listening"),
    method("eth_protocolVersion"),
    method("eth_syncing"),
    method("eth_coinbase"),
    method("eth_mining"),
    method("eth_hashrate"),
    method("eth_gasPrice"),
    method("eth_accounts"),
    method("eth_blockNumber"),
    method_at_block("eth_getBalance", 1),
    method("eth_getStorageAt"),
    method("eth_getTransactionCount"),
    method("eth_getBlockTransactionCountByHash"),
    method("eth_getBlockTransactionCountByNumber"),
    method("eth_getUncleCountByBlockHash"),
    method("eth_getUncleCountByBlockNumber"),
    method("eth_getCode"),
    method("eth_sign"),
    method("eth_sendTransaction"),
    method("eth_sendRawTransaction"),
    method_at_block("eth_call", 1),
    method("eth_estimateGas"),
    method("eth_getBlockByHash"),
    method("eth_getBlockByNumber"),
    method("eth_getTransactionByHash"),
    method("eth_getTransactionByBlockHashAndIndex"),
    method("eth_getTransactionByBlockNumberAndIndex"),
    method("eth_getTransactionReceipt"),
    method("eth_getUncleByBlockHashAndIndex"),
    method("eth_getUncleByBlockNumberAndIndex"),
    method("eth_getCompilers"),
    method("eth_compileLLL"),
    method("eth_compileSolidity"),
    method("eth_compileSerpent"),
    method("eth_newFilter"),
    method("eth_newBlockFilter"),
    method("eth_newPendingTransactionFilter"),
    method("eth_uninstallFilter"),
    method("eth_getFilterChanges"),
    method("eth_getFilterLogs"),
    method("eth_getLogs"),
    method("eth_getWork"),
    method("eth_submitWork"),
    method("eth_submitHashrate"),
    method("db_putString"),
    method("db_getString"),
    method("db_putHex"),
    method("db_getHex"),
    method("shh_post"),
    method("shh_version"),
    method("shh_newIdentity"),
    method("shh_hasIdentity"),
    method("shh_newGroup"),
    method("shh_addToGroup"),
    method("shh_newFilter"),
    method("shh_uninstallFilter"),
    method("shh_getFilterChanges"),
    method("shh_getMessages"),
];

/// The go-ethereum management APIs.
/// <https://github.com/ethereum/go-ethereum/wiki/Management-APIs>
pub const MANAGEMENT: &[MethodDescriptor] = &[
    method("admin_addPeer"),
    method("admin_datadir"),
    method("admin_nodeInfo"),
    method("admin_peers"),
    method("admin_setSolc"),
    method("admin_startRPC"),
    method("admin_startWS"),
    method("admin_stopRPC"),
    method("admin_stopWS"),
    method("debug_backtraceAt"),
    method("debug_blockProfile"),
    method("debug_cpuProfile"),
    method("debug_dumpBlock"),
    method("debug_gcStats"),
    method("debug_getBlockRlp"),
    method("debug_goTrace"),
    method("debug_memStats"),
    method("debug_seedHash"),
    method("debug_setHead"),
    method("debug_setBlockProfileRate"),
    method("debug_stacks"),
    method("debug_startCPUProfile"),
    method("debug_startGoTrace"),
    method("debug_stopCPUProfile"),
    method("debug_stopGoTrace"),
    method("debug_traceBlock"),
    method("debug_traceBlockByNumber"),
    method("debug_traceBlockByHash"),
    method("debug_traceBlockFromFile"),
    method("debug_traceTransaction"),
    method("debug_verbosity"),
    method("debug_vmodule"),
    method("debug_writeBlockProfile"),
    method("debug_writeMemProfile"),
    method("miner_hashrate"),
    method("miner_makeDAG"),
    method("miner_setExtra"),
    method("miner_setGasPrice"),
    method("miner_start"),
    method("miner_startAutoDAG"),
    method("miner_stop"),
    method("miner_stopAutoDAG"),
    method("personal_importRawKey"),
    method("personal_listAccounts"),
    method("personal_lockAccount"),
    method("personal_newAccount"),
    method("personal_unlockAccount"),
    method("personal_sendTransaction"),
    method("txpool_content"),
    method("txpool_inspect"),
    method("txpool_status"),
];

/// Converts a wire method name into its snake_case alias. Acronym runs
/// collapse into one word: `admin_startRPC` becomes `admin_start_rpc`.
fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 8);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let after_word = i > 0 && chars[i - 1].is_ascii_lowercase();
            let ends_acronym = i > 0 &&
                chars[i - 1].is_ascii_uppercase() &&
                chars.get(i + 1).map_or(false, |next| next.is_ascii_lowercase());
            if after_word || ends_acronym {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

static DISPATCH: Lazy<HashMap<String, &'static MethodDescriptor>> = Lazy::new(|| {
    let mut table = HashMap::with_capacity(2 * (STANDARD.len() + MANAGEMENT.len()));
    for descriptor in STANDARD.iter().chain(MANAGEMENT) {
        let previous = table.insert(descriptor.wire.to_owned(), descriptor);
        assert!(previous.is_none(), "duplicate RPC method in catalog: {}", descriptor.wire);

        let alias = snake_case(descriptor.wire);
        if alias != descriptor.wire {
            let previous = table.insert(alias, descriptor);
            assert!(previous.is_none(), "ambiguous alias for RPC method: {}", descriptor.wire);
        }
    }
    table
});

/// Looks a caller-facing name (wire form or snake_case alias) up in the
/// catalog.
pub(crate) fn resolve(name: &str) -> Option<&'static MethodDescriptor> {
    DISPATCH.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_aliases() {
        assert_eq!(snake_case("eth_getBalance"), "eth_get_balance");
        assert_eq!(snake_case("web3_clientVersion"), "web3_client_version");
        assert_eq!(snake_case("eth_getBlockTransactionCountByHash"), "eth_get_block_transaction_count_by_hash");
        assert_eq!(snake_case("admin_startRPC"), "admin_start_rpc");
        assert_eq!(snake_case("debug_startCPUProfile"), "debug_start_cpu_profile");
        assert_eq!(snake_case("eth_compileLLL"), "eth_compile_lll");
        assert_eq!(snake_case("miner_startAutoDAG"), "miner_start_auto_dag");
        assert_eq!(snake_case("web3_sha3"), "web3_sha3");
        assert_eq!(snake_case("eth_syncing"), "eth_syncing");
    }

    #[test]
    fn resolves_wire_names_and_aliases() {
        let by_wire = resolve("eth_getBalance").unwrap();
        let by_alias = resolve("eth_get_balance").unwrap();
        assert_eq!(by_wire.wire, "eth_getBalance");
        assert_eq!(by_alias.wire, "eth_getBalance");

        assert!(resolve("txpool_status").is_some());
        assert!(resolve("debug_start_cpu_profile").is_some());
        assert!(resolve("eth_definitelyNotAMethod").is_none());
        assert!(resolve("").is_none());
    }

    #[test]
    fn block_tag_allowlist_is_exactly_two_methods() {
        let flagged: Vec<&str> = STANDARD
            .iter()
            .chain(MANAGEMENT)
            .filter(|descriptor| descriptor.block_tag_at.is_some())
            .map(|descriptor| descriptor.wire)
            .collect();
        assert_eq!(flagged, ["eth_getBalance", "eth_call"]);
    }

    #[test]
    fn catalog_is_complete() {
        assert_eq!(STANDARD.len(), 62);
        assert_eq!(MANAGEMENT.len(), 51);
        // forces the duplicate checks in the table construction
        assert!(DISPATCH.len() > STANDARD.len() + MANAGEMENT.len());
    }
}
