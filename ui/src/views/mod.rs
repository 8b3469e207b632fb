mod upload;
pub use upload::Upload;

mod results;
pub use results::Results;

mod sample;
pub use sample::SampleReport;
