pub static REVISION_HELP: &str = "Use the 12 byte header revision

By default containers carry the width, height and channel count
of both payloads after the payload lengths (36 byte header).
Legacy files do not record which layout they use, so the same
flag must be passed when reading them back.";

pub static TAGGED_HELP: &str = "Record the header revision in the magic field

Tagged files can be read without --basic, readers that predate
tagging will ignore the magic and need to be told the layout.";

pub static QUALITY_HELP: &str = "JPEG quality used by --recompress

Range is between 1 and 100, defaults to 75.";
