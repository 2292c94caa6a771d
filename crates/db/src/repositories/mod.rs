//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Methods suffixed `_in` run on a caller-supplied
//! transaction so orchestrators can compose them atomically.

pub mod account;
pub mod bom;
pub mod production;
pub mod stock;
pub mod voucher;

pub use account::{AccountError, AccountRepository, CreateAccountInput};
pub use bom::{BomError, BomRepository, BomWithComponents, ComponentInput, CreateBomInput};
pub use production::{CreateOrderInput, OrderWithDetails, ProductionError, ProductionRepository};
pub use stock::{CreateItemInput, NewMovement, StockError, StockRepository};
pub use voucher::{PostingError, VoucherRepository, VoucherWithLines};
