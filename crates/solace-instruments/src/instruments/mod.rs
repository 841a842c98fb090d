pub mod gad7;
pub mod pcl5;
pub mod phq9;
