//! 基于目录的 RSA 密钥存储
//!
//! `<dir>/private.pem` (PKCS#8) 与 `<dir>/public.pem` (SPKI)。

use crate::app::error::{AppError, Result};
use crate::binder::{
    generate_keypair, private_key_from_pem, private_key_to_pem, public_key_fingerprint,
    public_key_from_pem, public_key_to_pem,
};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fs;
use std::path::{Path, PathBuf};

const PRIVATE_FILE: &str = "private.pem";
const PUBLIC_FILE: &str = "public.pem";
const FINGERPRINT_HEX_LEN: usize = 16;

pub struct KeyStore {
    dir: PathBuf,
}

impl KeyStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn private_path(&self) -> PathBuf {
        self.dir.join(PRIVATE_FILE)
    }

    pub fn public_path(&self) -> PathBuf {
        self.dir.join(PUBLIC_FILE)
    }

    pub fn exists(&self) -> bool {
        self.private_path().is_file() && self.public_path().is_file()
    }

    /// 生成并保存新密钥对；已存在且未指定 `force` 时拒绝覆盖
    pub fn generate(&self, bits: usize, force: bool) -> Result<RsaPublicKey> {
        if self.exists() && !force {
            return Err(AppError::KeyExists(self.dir.clone()));
        }
        let (private_key, public_key) = generate_keypair(bits)?;
        self.save(&private_key)?;
        Ok(public_key)
    }

    /// 保存私钥与对应公钥
    pub fn save(&self, private_key: &RsaPrivateKey) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let public_key = RsaPublicKey::from(private_key);
        write_private(&self.private_path(), &private_key_to_pem(private_key)?)?;
        fs::write(self.public_path(), public_key_to_pem(&public_key)?)?;
        Ok(())
    }

    pub fn load_private(&self) -> Result<RsaPrivateKey> {
        let pem = read_key_file(&self.private_path(), &self.dir)?;
        Ok(private_key_from_pem(&pem)?)
    }

    pub fn load_public(&self) -> Result<RsaPublicKey> {
        let pem = read_key_file(&self.public_path(), &self.dir)?;
        Ok(public_key_from_pem(&pem)?)
    }

    /// 公钥指纹（十六进制前 16 位）
    pub fn fingerprint(&self) -> Result<String> {
        let digest = public_key_fingerprint(&self.load_public()?)?;
        let mut fingerprint = hex::encode(digest);
        fingerprint.truncate(FINGERPRINT_HEX_LEN);
        Ok(fingerprint)
    }
}

fn read_key_file(path: &Path, dir: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(AppError::KeyNotFound(dir.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

#[cfg(unix)]
fn write_private(path: &Path, pem: &str) -> Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(pem.as_bytes())?;
    Ok(())
}

#[cfg(not(unix))]
fn write_private(path: &Path, pem: &str) -> Result<()> {
    fs::write(path, pem)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn temp_store(name: &str) -> KeyStore {
        let dir = std::env::temp_dir().join(format!("pnmark_keystore_{name}"));
        let _ = fs::remove_dir_all(&dir);
        KeyStore::new(dir)
    }

    #[test]
    fn save_and_load() {
        let store = temp_store("save_load");
        assert!(!store.exists());
        assert!(matches!(store.load_private(), Err(AppError::KeyNotFound(_))));

        let key = RsaPrivateKey::new(&mut StdRng::seed_from_u64(5), 1024).unwrap();
        store.save(&key).unwrap();
        assert!(store.exists());
        assert_eq!(store.load_private().unwrap(), key);
        assert_eq!(store.load_public().unwrap(), RsaPublicKey::from(&key));
        assert_eq!(store.fingerprint().unwrap().len(), FINGERPRINT_HEX_LEN);

        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn generate_refuses_overwrite() {
        let store = temp_store("overwrite");
        let key = RsaPrivateKey::new(&mut StdRng::seed_from_u64(6), 1024).unwrap();
        store.save(&key).unwrap();
        assert!(matches!(
            store.generate(1024, false),
            Err(AppError::KeyExists(_))
        ));
        let _ = fs::remove_dir_all(store.dir());
    }
}
