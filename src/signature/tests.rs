use quickcheck::{quickcheck, Arbitrary, Gen};
use rand::Rng;

use super::{DBusType, Signature, Type};

#[test]
fn empty_signature_is_accepted() {
    let sig = Signature::parse(b"").unwrap();
    assert!(sig.is_empty());
    assert_eq!(sig.render(), b"");
}

#[test]
fn scalars() {
    let sig = Signature::parse(b"ybnqiuxtdsogvh").unwrap();
    assert_eq!(
        sig.types(),
        [
            DBusType::Byte,
            DBusType::Boolean,
            DBusType::Int16,
            DBusType::UInt16,
            DBusType::Int32,
            DBusType::UInt32,
            DBusType::Int64,
            DBusType::UInt64,
            DBusType::Double,
            DBusType::String,
            DBusType::ObjectPath,
            DBusType::Signature,
            DBusType::Variant,
            DBusType::UnixFd,
        ]
    );
}

#[test]
fn dict_of_byte_to_string() {
    // a{ys}: byte-keyed string dict.
    let sig = Signature::parse(b"a{ys}").unwrap();
    assert_eq!(
        sig.types(),
        [
            DBusType::Array,
            DBusType::DictEntry,
            DBusType::DictEntryLength(2),
            DBusType::Byte,
            DBusType::String,
        ]
    );
    assert_eq!(sig.render(), b"a{ys}");
}

#[test]
fn nested_struct() {
    // Four levels of struct nesting, each wrapping a single byte.
    let sig = Signature::parse(b"(y(y(y(y))))").unwrap();
    assert_eq!(
        sig.types(),
        [
            DBusType::Struct,
            DBusType::StructLength(2),
            DBusType::Byte,
            DBusType::Struct,
            DBusType::StructLength(2),
            DBusType::Byte,
            DBusType::Struct,
            DBusType::StructLength(2),
            DBusType::Byte,
            DBusType::Struct,
            DBusType::StructLength(1),
            DBusType::Byte,
        ]
    );
    assert_eq!(sig.render(), b"(y(y(y(y))))");
}

#[test]
fn rejects_malformed_signatures() {
    assert!(Signature::parse(b"(a)").is_err());
    assert!(Signature::parse(b"()").is_err());
    assert!(Signature::parse(b"(i").is_err());
    assert!(Signature::parse(b"i)").is_err());
    assert!(Signature::parse(b"a").is_err());
    assert!(Signature::parse(b"a{vy}").is_err());
    assert!(Signature::parse(b"{sv}").is_err());
    assert!(Signature::parse(b"a{s}").is_err());
    assert!(Signature::parse(b"z").is_err());
}

#[test]
fn rejects_too_long() {
    assert!(Signature::parse(&[b'i'; 255]).is_ok());
    assert!(Signature::parse(&[b'i'; 256]).is_err());
}

#[test]
fn rejects_too_deep() {
    let nested: Vec<u8> = std::iter::repeat_n(b'a', 40).chain([b'i']).collect();
    assert!(Signature::parse(&nested).is_err());
}

#[test]
fn structural_iteration() {
    let sig = Signature::parse(b"ia{sv}(ii)").unwrap();
    let items: Vec<_> = sig.iter().collect();

    assert_eq!(items.len(), 3);
    assert_eq!(items[0], Type::Scalar(DBusType::Int32));

    let Type::Array(elem) = items[1] else {
        panic!("expected array");
    };
    assert_eq!(elem[0], DBusType::DictEntry);

    let Type::Struct(members) = items[2] else {
        panic!("expected struct");
    };
    assert_eq!(members, [DBusType::Int32, DBusType::Int32]);
}

/// A signature string that is valid by construction, for property testing.
#[derive(Debug, Clone)]
struct ValidSignature(Vec<u8>);

fn arbitrary_scalar<G: Gen>(g: &mut G) -> u8 {
    const SCALARS: &[u8] = b"ybnqiuxtdsogvh";
    SCALARS[g.gen_range(0, SCALARS.len())]
}

/// A basic (non-container, non-variant) scalar, the only kind valid as a
/// dict-entry key.
fn arbitrary_basic_scalar<G: Gen>(g: &mut G) -> u8 {
    const BASIC: &[u8] = b"ybnqiuxtdsog";
    BASIC[g.gen_range(0, BASIC.len())]
}

fn arbitrary_type<G: Gen>(g: &mut G, depth: usize, out: &mut Vec<u8>) {
    if depth >= 4 {
        out.push(arbitrary_scalar(g));
        return;
    }

    match g.gen_range(0, 4) {
        0 => out.push(arbitrary_scalar(g)),
        1 => {
            out.push(b'a');
            arbitrary_type(g, depth + 1, out);
        }
        2 => {
            out.push(b'(');
            let n = 1 + g.gen_range(0, 3);
            for _ in 0..n {
                arbitrary_type(g, depth + 1, out);
            }
            out.push(b')');
        }
        _ => {
            out.push(b'a');
            out.push(b'{');
            out.push(arbitrary_basic_scalar(g));
            arbitrary_type(g, depth + 1, out);
            out.push(b'}');
        }
    }
}

impl Arbitrary for ValidSignature {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        let count = g.gen_range(0, 5);
        let mut out = Vec::new();

        for _ in 0..count {
            arbitrary_type(g, 0, &mut out);
        }

        ValidSignature(out)
    }
}

quickcheck! {
    fn parse_render_round_trip(sig: ValidSignature) -> bool {
        let parsed = Signature::parse(&sig.0).expect("generator only produces valid signatures");
        parsed.render() == sig.0
    }
}
