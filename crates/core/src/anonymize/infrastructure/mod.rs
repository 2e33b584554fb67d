pub mod anonymizer_factory;
pub mod blur_anonymizer;
pub mod gaussian;
pub mod mask_anonymizer;
pub mod pixelate_anonymizer;
pub mod scale;
