//! Fixed access-control contract for the todo vault.
//!
//! The contract gates all vault access for one todo list: the owner holds
//! full permissions on the well-known todo directory until the contract is
//! terminated, after which the vault server refuses further requests. The
//! bytecode is deployed once per list with no constructor arguments; the
//! deployed address becomes the persisted identity.

/// Well-known directory address holding the todo item files.
pub const TODO_DIRECTORY: &str = "0x0000000000000000000000000000000000000001";

/// Compiled access-control contract (solc 0.6.12).
///
/// Exposes `hasExpired()` for the expiry check and `terminate()` for the
/// owner; permission bits follow the vault protocol's directory/read/write
/// layout.
pub const TODO_LIST_BYTECODE: &str = "6080604052336000806101000a81548173ffffffffffffffffffffffffffffffffffffffff021916908373ffffffffffffffffffffffffffffffffffffffff16021790555060008060146101000a81548160ff02191690831515021790555034801561006a57600080fd5b5061063a8061007a6000396000f3fe608060405234801561001057600080fd5b50600436106100a95760003560e01c80634f08de63116100715780634f08de63146102125780638da5cb5b1461029557806390e64d13146102c95780639e994d82146102e9578063d519f96d14610329578063edfa433f14610369576100a9565b80630c08bf88146100ae5780630dd542cf146100b857806321291239146100f85780632ed938d0146101385780634757d3bb14610178575b600080fd5b6100b66103a9565b005b6100c0610487565b60405180827effffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff1916815260200191505060405180910390f35b61010061048f565b60405180827effffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff1916815260200191505060405180910390f35b610140610497565b60405180827effffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff1916815260200191505060405180910390f35b6101da6004803603604081101561018e57600080fd5b81019080803573ffffffffffffffffffffffffffffffffffffffff169060200190929190803573ffffffffffffffffffffffffffffffffffffffff16906020019092919050505061049f565b60405180827effffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff1916815260200191505060405180910390f35b61021a610579565b6040518080602001828103825283818151815260200191508051906020019080838360005b8381101561025a57808201518184015260208101905061023f565b50505050905090810190601f1680156102875780820380516001836020036101000a031916815260200191505b509250505060405180910390f35b61029d6105b2565b604051808273ffffffffffffffffffffffffffffffffffffffff16815260200191505060405180910390f35b6102d16105d6565b60405180821515815260200191505060405180910390f35b6102f16105ec565b60405180827effffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff1916815260200191505060405180910390f35b6103316105f4565b60405180827effffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff1916815260200191505060405180910390f35b6103716105fc565b60405180827effffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff1916815260200191505060405180910390f35b60008054906101000a900473ffffffffffffffffffffffffffffffffffffffff1673ffffffffffffffffffffffffffffffffffffffff163373ffffffffffffffffffffffffffffffffffffffff161461046a576040517f08c379a00000000000000000000000000000000000000000000000000000000081526004018080602001828103825260118152602001807f7065726d697373696f6e2064656e69656400000000000000000000000000000081525060200191505060405180910390fd5b6001600060146101000a81548160ff021916908315150217905550565b600460f81b81565b608060f81b81565b600260f81b81565b60008060009054906101000a900473ffffffffffffffffffffffffffffffffffffffff1673ffffffffffffffffffffffffffffffffffffffff168373ffffffffffffffffffffffffffffffffffffffff1614158061050157506105006105d6565b5b1561051257600060f81b9050610573565b600173ffffffffffffffffffffffffffffffffffffffff168273ffffffffffffffffffffffffffffffffffffffff16141561056b57600160f81b600260f81b600460f81b608060f81b600060f81b171717179050610573565b600060f81b90505b92915050565b6040518060400160405280600581526020017f302e302e3200000000000000000000000000000000000000000000000000000081525081565b60008054906101000a900473ffffffffffffffffffffffffffffffffffffffff1681565b60008060149054906101000a900460ff16905090565b600160f81b81565b600760f81b81565b600060f81b8156fea264697066735822122069d4acc7dafaaf1d9db9838e1de0f2add2df8faf34532c583b2c49543c1a90ff64736f6c634300060c0033";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytecode_is_hex() {
        assert!(hex::decode(TODO_LIST_BYTECODE).is_ok());
    }

    #[test]
    fn test_todo_directory_shape() {
        assert!(TODO_DIRECTORY.starts_with("0x"));
        assert_eq!(TODO_DIRECTORY.len(), 42);
    }
}
