use bytes::Bytes;
use tracing::warn;

use crate::data::{Response, SuccessRange};
use crate::error::{Error, Result};

/// Pass the body through if the status is inside `range`.
pub fn accept(range: SuccessRange, response: Response) -> Result<Bytes> {
    if range.contains(response.status) {
        Ok(response.body)
    } else {
        warn!(status = response.status, %range, "status outside success range");
        Err(Error::RequestFailed)
    }
}
