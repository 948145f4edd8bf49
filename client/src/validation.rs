use crate::file::SelectedFile;

pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024; // 5MB
pub const ALLOWED_FILE_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/jpg"];

pub const INVALID_TYPE: &str = "Please select a valid image file (PNG or JPG).";
pub const FILE_TOO_LARGE: &str = "File size must be less than 5MB.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid { reason: &'static str },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

/// Type is checked before size, so a file failing both reports the type.
pub fn validate(media_type: &str, size: u64) -> ValidationResult {
    if !ALLOWED_FILE_TYPES.contains(&media_type) {
        return ValidationResult::Invalid {
            reason: INVALID_TYPE,
        };
    }

    if size > MAX_FILE_SIZE {
        return ValidationResult::Invalid {
            reason: FILE_TOO_LARGE,
        };
    }

    ValidationResult::Valid
}

pub fn validate_file(file: &SelectedFile) -> ValidationResult {
    validate(&file.media_type, file.size)
}
