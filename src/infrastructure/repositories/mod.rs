pub mod audio_repository;
pub mod completion_repository;
pub mod image_repository;
pub mod openai_completion_repository;
pub mod openai_error;
pub mod openai_image_repository;
pub mod openai_tts_repository;
pub mod polly_tts_repository;
pub mod tts_repository;
pub mod unconfigured_repository;

pub use audio_repository::AudioRepository;
pub use completion_repository::CompletionRepository;
pub use image_repository::ImageRepository;
pub use openai_completion_repository::OpenAiCompletionRepository;
pub use openai_image_repository::OpenAiImageRepository;
pub use openai_tts_repository::OpenAiTtsRepository;
pub use polly_tts_repository::PollyTtsRepository;
pub use tts_repository::TtsRepository;
pub use unconfigured_repository::UnconfiguredProvider;
