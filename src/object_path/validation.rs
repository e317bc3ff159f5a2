/// Test if `bytes` is a valid D-Bus object path.
///
/// A valid object path is non-empty, begins with `/`, consists of elements
/// separated by single `/` characters drawn from `[A-Za-z0-9_]`, contains no
/// empty elements, and has no trailing `/` unless the whole path is `/`.
///
/// # Examples
///
/// ```
/// use dbus_wire::is_valid_object_path;
///
/// assert!(is_valid_object_path(b"/"));
/// assert!(is_valid_object_path(b"/a"));
/// assert!(is_valid_object_path(b"/a/b"));
/// assert!(is_valid_object_path(b"/com/example/MusicPlayer1"));
///
/// assert!(!is_valid_object_path(b""));
/// assert!(!is_valid_object_path(b"a"));
/// assert!(!is_valid_object_path(b"a//b"));
/// assert!(!is_valid_object_path(b"a/b/"));
/// ```
pub const fn is_valid_object_path(bytes: &[u8]) -> bool {
    let [b'/', bytes @ ..] = bytes else {
        return false;
    };

    // Special case: "/" is a valid path.
    if bytes.is_empty() {
        return true;
    }

    let mut bytes = bytes;
    let mut component = false;

    while let [b, rest @ ..] = bytes {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' => {
                component = true;
            }
            b'/' => {
                if !component {
                    return false;
                }

                component = false;
            }
            _ => {
                return false;
            }
        }

        bytes = rest;
    }

    component
}
