static mut LAST_LEN: u32 = 0;

#[no_mangle]
pub extern "C" fn last_len() -> u32 {
    unsafe { LAST_LEN }
}

#[no_mangle]
pub extern "C" fn alloc(size: u32) -> u32 {
    let mut buf = Vec::<u8>::with_capacity(size as usize);
    let ptr = buf.as_mut_ptr() as u32;
    std::mem::forget(buf);
    ptr
}

#[no_mangle]
pub extern "C" fn dealloc(ptr: u32, size: u32) {
    if ptr == 0 || size == 0 {
        return;
    }
    unsafe {
        let _ = Vec::<u8>::from_raw_parts(ptr as *mut u8, size as usize, size as usize);
    }
}

/// Null, empty and non-UTF-8 input all read as "no text".
pub fn input_str(bytes: &[u8]) -> Option<&str> {
    if bytes.is_empty() {
        return None;
    }
    std::str::from_utf8(bytes).ok()
}

pub fn read_utf8(ptr: u32, len: u32) -> Option<&'static str> {
    if ptr == 0 || len == 0 {
        return None;
    }
    let bytes = unsafe { std::slice::from_raw_parts(ptr as *const u8, len as usize) };
    input_str(bytes)
}

pub fn write_out(text: &str) -> u32 {
    let bytes = text.as_bytes();
    let mut out = Vec::<u8>::with_capacity(bytes.len());
    out.extend_from_slice(bytes);
    unsafe {
        LAST_LEN = out.len() as u32;
    }
    let out_ptr = out.as_mut_ptr() as u32;
    std::mem::forget(out);
    out_ptr
}

/// Runs `f` over the input string, or writes an empty result when there is none.
pub fn transform(ptr: u32, len: u32, f: impl FnOnce(&str) -> String) -> u32 {
    let out = match read_utf8(ptr, len) {
        Some(s) => f(s),
        None => String::new(),
    };
    write_out(&out)
}
