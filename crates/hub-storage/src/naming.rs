use rand::RngCore;

/// 128 random bits, hex-encoded, plus the extension
pub fn random_file_name(extension: &str) -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("{}.{extension}", hex::encode(bytes))
}
