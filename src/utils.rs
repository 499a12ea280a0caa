use std::ffi::{ CStr, CString };
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use anyhow::{Context, Result};

/// Entries of an open directory, in the order `readdir` yields them.
///
/// The handle is closed when the iterator is dropped.
#[derive(Debug)]
pub struct DirIter {
    dir: *mut libc::DIR
}

impl Iterator for DirIter {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        unsafe {
            let entry = libc::readdir(self.dir);
            if entry.is_null() {
                None
            } else {
                let dname = (*entry).d_name.as_ptr();
                Some(CStr::from_ptr(dname).to_string_lossy().to_string())
            }
        }
    }
}

impl Drop for DirIter {
    fn drop(&mut self) {
        unsafe {
            libc::closedir(self.dir);
        }
    }
}

pub fn read_directory<P> (dirname: P) -> io::Result<DirIter>
where
    P: AsRef<Path>,
{
    let c_dirname = CString::new(dirname.as_ref().as_os_str().as_bytes())?;

    let dir = unsafe { libc::opendir(c_dirname.as_ptr()) };
    if dir.is_null() {
        return Err(io::Error::last_os_error());
    }

    Ok(DirIter { dir })
}

/// Login name of the invoking user.
///
/// `getlogin` needs a controlling terminal; without one the password entry
/// of the effective uid is used instead.
pub fn get_login () -> Result<String> {
    unsafe {
        let ptr = libc::getlogin();
        if !ptr.is_null() {
            return Ok(CStr::from_ptr(ptr).to_string_lossy().to_string());
        }

        let passwd = libc::getpwuid(libc::geteuid());
        if passwd.is_null() || (*passwd).pw_name.is_null() {
            return Err(io::Error::last_os_error()).context("no login name for the current user");
        }

        Ok(CStr::from_ptr((*passwd).pw_name).to_string_lossy().to_string())
    }
}

pub fn get_hostname () -> Result<String> {
    const SIZE: usize = 256;
    let mut buf = vec![0u8; SIZE];

    let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast(), SIZE) };
    if rc != 0 {
        return Err(io::Error::last_os_error()).context("gethostname failed");
    }

    let end = buf.iter().position(|&b| b == 0).unwrap_or(SIZE);
    Ok(String::from_utf8_lossy(&buf[..end]).to_string())
}

#[cfg(test)]
mod utility_tests {
    use super::*;

    #[test]
    fn readdir_test () {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let mut files = read_directory(dir.path()).unwrap().collect::<Vec<String>>();
        files.sort();

        assert_eq!(files, vec![".", "..", "a.txt", "sub"]);
    }

    #[test]
    fn readdir_missing () {
        let dir = tempfile::tempdir().unwrap();
        let err = read_directory(dir.path().join("nope")).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn hostname_test () {
        let host = get_hostname().unwrap();
        assert!(!host.is_empty());
    }
}
