use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;

pub fn splitter() -> Command {
    Command::cargo_bin("splitter").unwrap()
}

/// A source tree whose files are strays no matter which metadata tools are
/// installed, plus an empty destination directory for each category.
pub struct Workspace {
    pub temp_dir: TempDir,
    pub source: ChildPath,
    pub photos: ChildPath,
    pub strays: ChildPath,
}

pub fn setup_workspace() -> Workspace {
    let temp_dir = TempDir::new().unwrap();

    let source = temp_dir.child("source");
    source.child("notes.txt").write_str("notes").unwrap();
    source.child("DCIM/100APPLE/IMG_0001.AAE").write_str("<plist/>").unwrap();

    let photos = temp_dir.child("photos");
    photos.create_dir_all().unwrap();
    let strays = temp_dir.child("strays");
    strays.create_dir_all().unwrap();

    Workspace {
        temp_dir,
        source,
        photos,
        strays,
    }
}
