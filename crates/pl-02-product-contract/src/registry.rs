//! # Operation Registry
//!
//! Static table of the contract's transaction functions. Each entry names the
//! function, its positional parameters, whether it may write, and the decoder
//! turning the string arguments into a typed [`Invocation`].
//!
//! | Function | Parameters | Read-only |
//! |----------|------------|-----------|
//! | `InitLedger` | - | no |
//! | `ProductExists` | id | yes |
//! | `CreateProduct` | name, id, quantity, price, location, actor, imageUrl | no |
//! | `GetProduct` | id | yes |
//! | `GetAllProducts` | - | yes |
//! | `UpdateProduct` | id, quantity, price, name, location, actor, imageUrl | no |
//! | `DeleteProduct` | id | no |
//! | `TransferProduct` | id, newActor | no |

use crate::domain::{check_id, parse_price, Actor, Location, Product, ProductUpdate};
use crate::errors::ContractError;

/// A decoded call of one contract function.
#[derive(Clone, Debug, PartialEq)]
pub enum Invocation {
    InitLedger,
    ProductExists { id: String },
    CreateProduct(Product),
    GetProduct { id: String },
    GetAllProducts,
    UpdateProduct { id: String, update: ProductUpdate },
    DeleteProduct { id: String },
    TransferProduct { id: String, new_actor: Actor },
}

/// Positional string arguments → typed invocation.
pub type ArgDecoder = fn(&[String]) -> Result<Invocation, ContractError>;

/// One registered transaction function.
#[derive(Clone, Copy)]
pub struct OperationSpec {
    pub name: &'static str,
    pub params: &'static [&'static str],
    /// Read-only functions are never committed.
    pub read_only: bool,
    decode: ArgDecoder,
}

impl OperationSpec {
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Check the argument count, then decode.
    pub fn decode_args(&self, args: &[String]) -> Result<Invocation, ContractError> {
        if args.len() != self.arity() {
            return Err(ContractError::ArityMismatch {
                function: self.name.to_string(),
                expected: self.arity(),
                actual: args.len(),
            });
        }
        (self.decode)(args)
    }
}

impl std::fmt::Debug for OperationSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationSpec")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("read_only", &self.read_only)
            .finish_non_exhaustive()
    }
}

pub static REGISTRY: &[OperationSpec] = &[
    OperationSpec {
        name: "InitLedger",
        params: &[],
        read_only: false,
        decode: |_| Ok(Invocation::InitLedger),
    },
    OperationSpec {
        name: "ProductExists",
        params: &["id"],
        read_only: true,
        decode: |args| {
            let [id] = args else { return Err(arity("ProductExists", 1, args)) };
            Ok(Invocation::ProductExists { id: id.clone() })
        },
    },
    OperationSpec {
        name: "CreateProduct",
        params: &["name", "id", "quantity", "price", "location", "actor", "imageUrl"],
        read_only: false,
        decode: decode_create,
    },
    OperationSpec {
        name: "GetProduct",
        params: &["id"],
        read_only: true,
        decode: |args| {
            let [id] = args else { return Err(arity("GetProduct", 1, args)) };
            Ok(Invocation::GetProduct { id: id.clone() })
        },
    },
    OperationSpec {
        name: "GetAllProducts",
        params: &[],
        read_only: true,
        decode: |_| Ok(Invocation::GetAllProducts),
    },
    OperationSpec {
        name: "UpdateProduct",
        params: &["id", "quantity", "price", "name", "location", "actor", "imageUrl"],
        read_only: false,
        decode: decode_update,
    },
    OperationSpec {
        name: "DeleteProduct",
        params: &["id"],
        read_only: false,
        decode: |args| {
            let [id] = args else { return Err(arity("DeleteProduct", 1, args)) };
            Ok(Invocation::DeleteProduct { id: id_arg(id)? })
        },
    },
    OperationSpec {
        name: "TransferProduct",
        params: &["id", "newActor"],
        read_only: false,
        decode: |args| {
            let [id, new_actor] = args else { return Err(arity("TransferProduct", 2, args)) };
            Ok(Invocation::TransferProduct {
                id: id_arg(id)?,
                new_actor: new_actor.parse()?,
            })
        },
    },
];

/// Find a function by exact name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static OperationSpec> {
    REGISTRY.iter().find(|spec| spec.name == name)
}

// =============================================================================
// DECODERS
// =============================================================================
// Queries take the id as given: an id that cannot exist is simply absent.
// Mutations refuse ids that could never have been created.

fn arity(function: &str, expected: usize, args: &[String]) -> ContractError {
    ContractError::ArityMismatch {
        function: function.to_string(),
        expected,
        actual: args.len(),
    }
}

fn id_arg(raw: &str) -> Result<String, ContractError> {
    check_id(raw)?;
    Ok(raw.to_string())
}

fn decode_create(args: &[String]) -> Result<Invocation, ContractError> {
    let [name, id, quantity, price, location, actor, image_url] = args else {
        return Err(arity("CreateProduct", 7, args));
    };
    Ok(Invocation::CreateProduct(Product {
        id: id_arg(id)?,
        name: name.clone(),
        quantity: quantity.clone(),
        price: parse_price(price)?,
        location: Location::parse(location)?,
        actor: actor.parse()?,
        image_url: image_url.clone(),
    }))
}

fn decode_update(args: &[String]) -> Result<Invocation, ContractError> {
    let [id, quantity, price, name, location, actor, image_url] = args else {
        return Err(arity("UpdateProduct", 7, args));
    };
    Ok(Invocation::UpdateProduct {
        id: id_arg(id)?,
        update: ProductUpdate {
            name: name.clone(),
            quantity: quantity.clone(),
            price: parse_price(price)?,
            location: Location::parse(location)?,
            actor: actor.parse()?,
            image_url: image_url.clone(),
        },
    })
}

// =============================================================================
// TESTS
// =============================================================================
