use std::path::Path;

use tokio::{
    fs::File,
    io::{self, AsyncBufReadExt, Lines},
};

/// Read a file from the given path into a list of strings, skipping the first `offset` lines
pub async fn read_lines_from(path: &Path, offset: usize) -> io::Result<Vec<String>> {
    let mut r = file_reader(path).await?;
    let mut lines = Vec::new();
    let mut skipped = 0;

    while let Some(line) = r.next_line().await? {
        if skipped < offset {
            skipped += 1;
            continue;
        }

        lines.push(line);
    }

    Ok(lines)
}

async fn file_reader(path: &Path) -> io::Result<Lines<io::BufReader<File>>> {
    let f = File::open(path).await?;

    Ok(io::BufReader::new(f).lines())
}
