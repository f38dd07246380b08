pub mod proposals;

pub use proposals::ProposalsRepo;
