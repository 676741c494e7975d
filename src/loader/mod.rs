mod error;
mod sample_set;
#[cfg(test)]
pub mod test_fixture;

pub use error::SampleError;
pub use sample_set::SampleSet;
