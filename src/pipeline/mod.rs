pub mod analysis; // Risk analysis: prompt → Gemini → validated report, demo fallback
