mod key_id;
mod mpi;

pub use self::key_id::KeyId;
pub use self::mpi::Mpi;
