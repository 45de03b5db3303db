pub mod check;
pub mod convert;
pub mod embed;
pub mod extract;
pub mod hash;
pub mod keygen;
pub mod seal;
pub mod status;
pub mod verify;
