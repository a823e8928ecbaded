use crate::notification::ObjectNotification;
use crate::registrar::RegistrarError;
use crate::schema::{ColumnDef, StorageFormat, COLUMNS, JSON_TEXT_FORMAT};

/// Number of `/`-separated segments in a delivered object key
const KEY_SEGMENTS: usize = 6;

/// Components of a delivered object key
///
/// Keys have the layout `folder/year/month/day/hour/filename`, which is the
/// prefix layout the delivery stream writes objects under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKeyParts {
    pub folder: String,
    pub year: String,
    pub month: String,
    pub day: String,
    pub hour: String,
    pub filename: String,
}

impl TryFrom<&str> for ObjectKeyParts {
    type Error = RegistrarError;

    fn try_from(key: &str) -> Result<Self, Self::Error> {
        let parts: Vec<&str> = key.split('/').collect();

        match parts.as_slice() {
            [folder, year, month, day, hour, filename] => Ok(Self {
                folder: folder.to_string(),
                year: year.to_string(),
                month: month.to_string(),
                day: day.to_string(),
                hour: hour.to_string(),
                filename: filename.to_string(),
            }),
            _ => Err(RegistrarError::MalformedKey {
                key: key.to_string(),
                expected: KEY_SEGMENTS,
                segments: parts.len(),
            }),
        }
    }
}

impl ObjectKeyParts {
    /// Value of the `date` partition column, `YYYY-MM-DD` as written in the key
    pub fn date(&self) -> String {
        format!("{}-{}-{}", self.year, self.month, self.day)
    }

    /// Storage location registered for the partition.
    ///
    /// Stops at the day prefix even though partitions are keyed by hour, so
    /// every hourly partition of a day points at the same prefix. Kept as-is
    /// until the intended layout is confirmed.
    pub fn location(&self, bucket: &str) -> String {
        format!(
            "s3://{bucket}/{folder}/{year}/{month}/{day}",
            bucket = bucket,
            folder = self.folder,
            year = self.year,
            month = self.month,
            day = self.day,
        )
    }
}

/// Partition metadata handed to the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionDescriptor {
    date: String,
    hour: String,
    pub location: String,
    pub columns: &'static [ColumnDef],
    pub format: StorageFormat,
}

impl PartitionDescriptor {
    /// Derive the partition for a delivered object
    pub fn from_notification(notification: &ObjectNotification) -> Result<Self, RegistrarError> {
        let parts = ObjectKeyParts::try_from(notification.object_key.as_str())?;

        Ok(Self {
            date: parts.date(),
            hour: parts.hour.clone(),
            location: parts.location(&notification.bucket_name),
            columns: &COLUMNS,
            format: JSON_TEXT_FORMAT,
        })
    }

    /// Partition column values: `[date, hour]`
    pub fn values(&self) -> Vec<String> {
        vec![self.date.clone(), self.hour.clone()]
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn hour(&self) -> &str {
        &self.hour
    }
}
