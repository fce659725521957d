// Copyright 2026 The Binius Developers
use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
	#[error("failed to create directory {}", path.display())]
	CreateDir {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("failed to write {}", path.display())]
	Write {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("failed to copy {} to {}", from.display(), to.display())]
	Copy {
		from: PathBuf,
		to: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("{} does not exist", .0.display())]
	MissingInput(PathBuf),
	#[error(transparent)]
	Walk(#[from] walkdir::Error),
}
