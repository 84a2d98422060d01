/// A request fixture plus the read size it is fed with.
#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    file: TestFile,
    fragment: Fragment,
}

impl TestCase {
    pub fn new(name: &'static str, file: TestFile, fragment: Fragment) -> Self {
        Self { name, file, fragment }
    }

    /// The whole request is available to the first parse call.
    pub fn whole(name: &'static str, file: TestFile) -> Self {
        Self::new(name, file, Fragment::Whole)
    }

    /// The request arrives `size` bytes at a time.
    pub fn fragmented(name: &'static str, file: TestFile, size: usize) -> Self {
        Self::new(name, file, Fragment::Sized(size))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn file(&self) -> &TestFile {
        &self.file
    }

    pub fn fragment(&self) -> Fragment {
        self.fragment
    }

    /// Bytes handed out per read.
    pub fn read_size(&self) -> usize {
        match self.fragment {
            Fragment::Whole => self.file.content().len(),
            Fragment::Sized(size) => size,
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct TestFile {
    file_name: &'static str,
    content: &'static str,
}

impl TestFile {
    pub const fn new(file_name: &'static str, content: &'static str) -> Self {
        Self { file_name, content }
    }

    pub fn content(&self) -> &'static str {
        self.content
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Fragment {
    Whole,
    Sized(usize),
}

/// A blocking reader handing out at most `read_size` bytes per call.
#[derive(Debug)]
pub struct SlowReader {
    data: &'static [u8],
    pos: usize,
    read_size: usize,
}

impl SlowReader {
    pub fn new(case: &TestCase) -> Self {
        Self { data: case.file().content().as_bytes(), pos: 0, read_size: case.read_size() }
    }
}

impl std::io::Read for SlowReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.read_size.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}
