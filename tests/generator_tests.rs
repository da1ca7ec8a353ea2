use dtomapper::generator::{make_dto, MakeOptions};
use std::fs;
use std::path::Path;

fn options(root: &Path, name: &str, force: bool) -> MakeOptions {
    MakeOptions {
        name: name.to_string(),
        dir: root.join("src/dto"),
        force,
        stub: root.join("stubs/dto.stub"),
    }
}

#[test]
fn test_make_writes_default_skeleton() {
    let tmp = tempfile::tempdir().unwrap();
    let path = make_dto(&options(tmp.path(), "UserDto", false)).unwrap();

    assert_eq!(path, tmp.path().join("src/dto/user_dto.rs"));
    let source = fs::read_to_string(&path).unwrap();
    assert!(source.contains("impl DataTransferObject for UserDto"));
    assert!(source.contains("TypeDescriptor::of::<Self>()"));
}

#[test]
fn test_published_stub_overrides_default() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("stubs")).unwrap();
    fs::write(
        tmp.path().join("stubs/dto.stub"),
        "// custom {{ module }}\npub struct {{ name }};\n",
    )
    .unwrap();

    let path = make_dto(&options(tmp.path(), "order::CreateOrderDto", false)).unwrap();
    assert_eq!(path, tmp.path().join("src/dto/order/create_order_dto.rs"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "// custom order\npub struct CreateOrderDto;\n"
    );
}

#[test]
fn test_existing_file_requires_force() {
    let tmp = tempfile::tempdir().unwrap();
    let path = make_dto(&options(tmp.path(), "Order/CreateOrderDto", false)).unwrap();
    fs::write(&path, "// mine").unwrap();

    let err = make_dto(&options(tmp.path(), "Order/CreateOrderDto", false)).unwrap_err();
    assert!(err.to_string().contains("already exists"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "// mine");

    make_dto(&options(tmp.path(), "Order/CreateOrderDto", true)).unwrap();
    assert_ne!(fs::read_to_string(&path).unwrap(), "// mine");
}

#[test]
fn test_invalid_names_write_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(make_dto(&options(tmp.path(), "lowercase", false)).is_err());
    assert!(!tmp.path().join("src").exists());
}
