//! クライアント側の入力検証
//!
//! ネットワーク呼び出しの前に弾く（再試行なし）。

use crate::error::ValidationError;

/// 写真の最大サイズ（10 MiB）
pub const MAX_PHOTO_BYTES: u64 = 10 * 1024 * 1024;

/// パスワードの最小長
pub const MIN_PASSWORD_LEN: usize = 6;

/// 捜索用写真の検証（MIMEが`image/`で始まり、10 MiB以下）
pub fn validate_photo(mime_type: &str, size: u64) -> Result<(), ValidationError> {
    if !mime_type.starts_with("image/") {
        return Err(ValidationError::NotAnImage {
            mime: mime_type.to_string(),
        });
    }
    if size > MAX_PHOTO_BYTES {
        return Err(ValidationError::TooLarge {
            size,
            limit: MAX_PHOTO_BYTES,
        });
    }
    Ok(())
}

/// 拡張子からMIMEタイプを推定（CLIでのファイル指定用）
pub fn mime_from_extension(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "mp4" => "video/mp4",
        "avi" => "video/avi",
        "mov" => "video/mov",
        _ => "application/octet-stream",
    }
}

/// `local@domain.tld`形式か
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let valid = email
        .split_once('@')
        .filter(|(local, domain)| {
            !local.is_empty()
                && !local.contains(char::is_whitespace)
                && !domain.contains('@')
                && !domain.contains(char::is_whitespace)
        })
        .and_then(|(_, domain)| domain.rsplit_once('.'))
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty());

    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(ValidationError::WeakPassword)
    }
}

/// 必須項目（空白のみは空扱い）
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_accepts_images() {
        assert!(validate_photo("image/jpeg", 5 * 1024 * 1024).is_ok());
        assert!(validate_photo("image/png", 0).is_ok());
        assert!(validate_photo("image/webp", MAX_PHOTO_BYTES).is_ok());
    }

    #[test]
    fn test_photo_rejects_non_images() {
        for mime in ["video/mp4", "application/pdf", "text/plain", "", "imagex/jpeg"] {
            assert!(
                matches!(validate_photo(mime, 10), Err(ValidationError::NotAnImage { .. })),
                "accepted {}",
                mime
            );
        }
    }

    #[test]
    fn test_photo_rejects_oversize() {
        let err = validate_photo("image/jpeg", MAX_PHOTO_BYTES + 1).unwrap_err();
        assert!(matches!(err, ValidationError::TooLarge { .. }));
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_from_extension("face.JPG"), "image/jpeg");
        assert_eq!(mime_from_extension("face.png"), "image/png");
        assert_eq!(mime_from_extension("notes.txt"), "application/octet-stream");
        assert_eq!(mime_from_extension("noext"), "application/octet-stream");
    }

    #[test]
    fn test_email() {
        assert!(validate_email("asha@example.com").is_ok());
        assert!(validate_email("asha@example").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a sha@example.com").is_err());
        assert!(validate_email("asha@@example.com").is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("123456").is_ok());
        assert!(validate_password("12345").is_err());
    }

    #[test]
    fn test_require() {
        assert!(require("name", "Lobby").is_ok());
        assert_eq!(require("name", "  "), Err(ValidationError::MissingField("name")));
    }
}
